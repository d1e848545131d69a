use std::fmt::{Display, Formatter};

use itertools::Itertools;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

use crate::notation::error::NotationError;
use crate::notation::parsers;

/// Fielding positions by their standard numeric codes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoPrimitive, TryFromPrimitive,
)]
#[repr(u8)]
pub enum Position {
    Pitcher = 1,
    Catcher = 2,
    FirstBase = 3,
    SecondBase = 4,
    ThirdBase = 5,
    Shortstop = 6,
    LeftField = 7,
    CenterField = 8,
    RightField = 9,
}

impl Position {
    pub fn label(self) -> &'static str {
        match self {
            Position::Pitcher => "Pitcher",
            Position::Catcher => "Catcher",
            Position::FirstBase => "First base",
            Position::SecondBase => "Second base",
            Position::ThirdBase => "Third base",
            Position::Shortstop => "Shortstop",
            Position::LeftField => "Left field",
            Position::CenterField => "Center field",
            Position::RightField => "Right field",
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattedBall {
    Grounder,
    LineDrive,
    FlyBall,
    PopUp,
    Bunt,
}

impl BattedBall {
    pub fn code(self) -> char {
        match self {
            BattedBall::Grounder => 'G',
            BattedBall::LineDrive => 'L',
            BattedBall::FlyBall => 'F',
            BattedBall::PopUp => 'P',
            BattedBall::Bunt => 'B',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BattedBall::Grounder => "Grounder",
            BattedBall::LineDrive => "Line drive",
            BattedBall::FlyBall => "Fly ball",
            BattedBall::PopUp => "Pop up",
            BattedBall::Bunt => "Bunt",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultKind {
    Single,
    Double,
    Triple,
    HomeRun,
    Strikeout,
    Walk,
    HitByPitch,
    Error,
    FieldersChoice,
    DoublePlay,
    TriplePlay,
    SacFly,
    SacBunt,
    IntentionalWalk,
    CatcherInterference,
    OutAdvancing,
    NoPlay,
    GenericOut,
    GroundedIntoDP,
    LinedIntoDP,
    ForceOut,
    UnassistedOut,
}

impl ResultKind {
    /// Kinds that commit straight from PLAY mode, with no batted-ball or
    /// fielder information.
    pub fn needs_detail(self) -> bool {
        !matches!(
            self,
            ResultKind::Strikeout
                | ResultKind::Walk
                | ResultKind::HitByPitch
                | ResultKind::IntentionalWalk
                | ResultKind::CatcherInterference
                | ResultKind::NoPlay
        )
    }

    /// Kinds written `<Code><Fielder>/<BattedBall><Sequence>`, which
    /// auto-commit once the minimum fielder count is entered.
    pub fn is_hit_style(self) -> bool {
        matches!(
            self,
            ResultKind::Single
                | ResultKind::Double
                | ResultKind::Triple
                | ResultKind::HomeRun
                | ResultKind::Error
                | ResultKind::FieldersChoice
                | ResultKind::SacFly
                | ResultKind::SacBunt
                | ResultKind::OutAdvancing
        )
    }

    /// Kinds written `<Sequence>/<BattedBall>[/<Modifier>]`. These have
    /// ambiguous-length fielder chains and only commit explicitly.
    pub fn is_out_style(self) -> bool {
        self.needs_detail() && !self.is_hit_style()
    }

    pub fn min_fielders(self) -> usize {
        usize::from(self.is_hit_style())
    }

    /// Leading notation code for bare and hit-style kinds. Out-style kinds
    /// lead with their fielder sequence instead.
    pub fn code(self) -> &'static str {
        match self {
            ResultKind::Single => "S",
            ResultKind::Double => "D",
            ResultKind::Triple => "T",
            ResultKind::HomeRun => "HR",
            ResultKind::Strikeout => "K",
            ResultKind::Walk => "W",
            ResultKind::HitByPitch => "HP",
            ResultKind::Error => "E",
            ResultKind::FieldersChoice => "FC",
            ResultKind::SacFly => "SF",
            ResultKind::SacBunt => "SH",
            ResultKind::IntentionalWalk => "IW",
            ResultKind::CatcherInterference => "CI",
            ResultKind::OutAdvancing => "OA",
            ResultKind::NoPlay => "ND",
            ResultKind::GenericOut
            | ResultKind::GroundedIntoDP
            | ResultKind::LinedIntoDP
            | ResultKind::DoublePlay
            | ResultKind::TriplePlay
            | ResultKind::ForceOut
            | ResultKind::UnassistedOut => "",
        }
    }

    /// Trailing modifier token for out-style kinds, if any.
    pub fn out_modifier(self) -> Option<&'static str> {
        match self {
            ResultKind::GroundedIntoDP => Some("GDP"),
            ResultKind::LinedIntoDP => Some("LDP"),
            ResultKind::DoublePlay => Some("DP"),
            ResultKind::TriplePlay => Some("TP"),
            ResultKind::ForceOut => Some("FO"),
            ResultKind::UnassistedOut => Some("UO"),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ResultKind::Single => "Single",
            ResultKind::Double => "Double",
            ResultKind::Triple => "Triple",
            ResultKind::HomeRun => "Home run",
            ResultKind::Strikeout => "Strikeout",
            ResultKind::Walk => "Walk",
            ResultKind::HitByPitch => "Hit by pitch",
            ResultKind::Error => "Error",
            ResultKind::FieldersChoice => "Fielder's choice",
            ResultKind::DoublePlay => "Double play",
            ResultKind::TriplePlay => "Triple play",
            ResultKind::SacFly => "Sacrifice fly",
            ResultKind::SacBunt => "Sacrifice bunt",
            ResultKind::IntentionalWalk => "Intentional walk",
            ResultKind::CatcherInterference => "Catcher interference",
            ResultKind::OutAdvancing => "Out advancing",
            ResultKind::NoPlay => "No play",
            ResultKind::GenericOut => "Out",
            ResultKind::GroundedIntoDP => "Grounded into double play",
            ResultKind::LinedIntoDP => "Lined into double play",
            ResultKind::ForceOut => "Force out",
            ResultKind::UnassistedOut => "Unassisted out",
        }
    }
}

/// A parsed play descriptor: the outcome of one plate appearance.
///
/// The fielder sequence records the order the ball was handled. It must be
/// empty for the bare kinds (`K`, `W`, `HP`, `IW`, `CI`, `ND`) and non-empty
/// for everything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayDescriptor {
    pub result: ResultKind,
    pub batted: Option<BattedBall>,
    pub fielders: Vec<Position>,
}

impl PlayDescriptor {
    pub fn bare(result: ResultKind) -> PlayDescriptor {
        PlayDescriptor {
            result,
            batted: None,
            fielders: Vec::new(),
        }
    }
}

impl Display for PlayDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let sequence = self.fielders.iter().join("");
        if !self.result.needs_detail() {
            return write!(f, "{}", self.result.code());
        }
        let batted = match self.batted {
            Some(batted) => batted.code(),
            None => return write!(f, "{}", self.result.code()),
        };
        if self.result.is_hit_style() {
            match self.fielders.first() {
                Some(first) => write!(f, "{}{}/{}{}", self.result.code(), first, batted, sequence),
                None => write!(f, "{}/{}", self.result.code(), batted),
            }
        } else {
            match self.result.out_modifier() {
                Some(modifier) => write!(f, "{}/{}/{}", sequence, batted, modifier),
                None => write!(f, "{}/{}", sequence, batted),
            }
        }
    }
}

pub fn parse_play_descriptor(text: &str) -> Result<PlayDescriptor, NotationError> {
    match parsers::parse_descriptor(text) {
        Ok((_, descriptor)) => Ok(descriptor),
        Err(err) => Err(NotationError::InvalidDescriptor {
            text: text.to_string(),
            reason: err.to_string(),
        }),
    }
}

pub fn format_play_descriptor(descriptor: &PlayDescriptor) -> String {
    descriptor.to_string()
}
