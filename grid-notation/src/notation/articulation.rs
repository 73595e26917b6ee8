use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{NotationError, NotationSplitPosition};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Articulation {
    Accent,
    Marcato,
    Portato,
    Staccatissimo,
    Staccato,
    Tenuto,
}
impl NotationSplitPosition for Articulation {
    fn is_head(&self) -> bool {
        true
    }
}
impl fmt::Display for Articulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            Self::Accent => "accent",
            Self::Marcato => "marcato",
            Self::Portato => "portato",
            Self::Staccatissimo => "staccatissimo",
            Self::Staccato => "staccato",
            Self::Tenuto => "tenuto",
        };
        write!(f, "{name}")
    }
}
impl FromStr for Articulation {
    type Err = NotationError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accent" => Ok(Self::Accent),
            "marcato" => Ok(Self::Marcato),
            "portato" => Ok(Self::Portato),
            "staccatissimo" => Ok(Self::Staccatissimo),
            "staccato" => Ok(Self::Staccato),
            "tenuto" => Ok(Self::Tenuto),
            x => Err(NotationError::UnexpectedToken(x.to_string())),
        }
    }
}

/// Fermata belongs to the end of the sound, so it is kept at the tail.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Fermata {
    Short,
    #[default]
    Normal,
    Long,
}
impl NotationSplitPosition for Fermata {
    fn is_head(&self) -> bool {
        false
    }
}
impl fmt::Display for Fermata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            Self::Short => "shortfermata",
            Self::Normal => "fermata",
            Self::Long => "longfermata",
        };
        write!(f, "{name}")
    }
}
impl FromStr for Fermata {
    type Err = NotationError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shortfermata" => Ok(Self::Short),
            "fermata" => Ok(Self::Normal),
            "longfermata" => Ok(Self::Long),
            x => Err(NotationError::UnexpectedToken(x.to_string())),
        }
    }
}

#[cfg(test)]
#[test]
fn test_articulation_names() {
    for articulation in [
        Articulation::Accent,
        Articulation::Staccato,
        Articulation::Tenuto,
    ] {
        assert_eq!(articulation.to_string().parse(), Ok(articulation));
    }
    assert_eq!(
        "legato".parse::<Articulation>(),
        Err(NotationError::UnexpectedToken("legato".to_string()))
    );
    assert_eq!("longfermata".parse(), Ok(Fermata::Long));
}
