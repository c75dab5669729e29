//! One scripted action of a simulation

use groupgo_domain::{MemberId, VoteChoice};
use std::fmt;
use std::str::FromStr;

/// What to do on the group's active option
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationStep {
    /// `ana=yes`, `ben=roll`
    Vote { member: MemberId, choice: VoteChoice },
    /// Skip the active option after a completed, split vote
    Advance,
    /// Re-check the active option against the current roster
    Resolve,
}

impl FromStr for SimulationStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_lowercase().as_str() {
            "advance" => return Ok(SimulationStep::Advance),
            "resolve" => return Ok(SimulationStep::Resolve),
            _ => {}
        }

        let Some((member, choice)) = s.split_once('=') else {
            return Err(format!(
                "Invalid step: {}. Expected MEMBER=yes, MEMBER=roll, advance or resolve",
                s
            ));
        };
        let member = member.trim();
        if member.is_empty() {
            return Err(format!("Invalid step: {}. Member id is empty", s));
        }
        Ok(SimulationStep::Vote {
            member: MemberId::new(member),
            choice: choice.parse()?,
        })
    }
}

impl fmt::Display for SimulationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationStep::Vote { member, choice } => write!(f, "{} votes {}", member, choice),
            SimulationStep::Advance => write!(f, "advance"),
            SimulationStep::Resolve => write!(f, "resolve"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vote_steps() {
        assert_eq!(
            "ana=yes".parse::<SimulationStep>().unwrap(),
            SimulationStep::Vote {
                member: MemberId::new("ana"),
                choice: VoteChoice::Yes
            }
        );
        assert_eq!(
            " ben = Roll ".parse::<SimulationStep>().unwrap(),
            SimulationStep::Vote {
                member: MemberId::new("ben"),
                choice: VoteChoice::RollAgain
            }
        );
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!("ADVANCE".parse::<SimulationStep>().unwrap(), SimulationStep::Advance);
        assert_eq!("resolve".parse::<SimulationStep>().unwrap(), SimulationStep::Resolve);
    }

    #[test]
    fn test_parse_errors() {
        assert!("ana".parse::<SimulationStep>().is_err());
        assert!("=yes".parse::<SimulationStep>().is_err());
        assert!("ana=perhaps".parse::<SimulationStep>().unwrap_err().contains("Unknown vote"));
    }

    #[test]
    fn test_display() {
        let step: SimulationStep = "cy=roll".parse().unwrap();
        assert_eq!(step.to_string(), "cy votes roll again");
    }
}
