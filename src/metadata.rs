//! Game metadata read from the root node of a record.
//!
//! Each root property maps to one typed field through [`PROPERTY_FIELDS`].
//! Missing properties leave their field `None`; present but unparsable numeric
//! values are an error.

use serde::Serialize;
use sgf_parse::SgfProp;
use sgf_parse::go::Prop;

use crate::board::Color;
use crate::error::{Error, Result};
use crate::sgf::{GoNode, main_sequence};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GameMetadata {
    pub url: Option<String>,
    pub game_id: Option<String>,
    pub date: Option<String>,
    pub black_name: Option<String>,
    pub white_name: Option<String>,
    pub black_rank: Option<String>,
    pub white_rank: Option<String>,
    pub main_time: Option<String>,
    pub overtime: Option<String>,
    pub result: Option<String>,
    pub size: Option<usize>,
    pub handicap: Option<usize>,
    pub komi: Option<f64>,
    pub ruleset: Option<String>,
    pub game_type: Option<String>,
    pub ranked: Option<bool>,
    pub winner: Option<Color>,
    /// Main-line nodes after the root.
    pub num_moves: usize,
}

type Setter = fn(&mut GameMetadata, &Prop) -> Result<()>;

macro_rules! text {
    ($field:ident) => {
        |m: &mut GameMetadata, p: &Prop| {
            m.$field = Some(text(p)?);
            Ok(())
        }
    };
}

/// Root property identifier and the setter that fills its field.
pub const PROPERTY_FIELDS: &[(&str, Setter)] = &[
    ("PC", set_url),
    ("DT", text!(date)),
    ("PB", text!(black_name)),
    ("PW", text!(white_name)),
    ("BR", text!(black_rank)),
    ("WR", text!(white_rank)),
    ("TM", text!(main_time)),
    ("OT", text!(overtime)),
    ("RE", set_result),
    ("SZ", |m, p| match p {
        Prop::SZ((width, height)) if width == height => {
            m.size = Some(usize::from(*width));
            Ok(())
        }
        _ => Err(invalid(p)),
    }),
    ("HA", |m, p| match p {
        Prop::HA(n) => {
            m.handicap = Some(usize::try_from(*n).map_err(|_| invalid(p))?);
            Ok(())
        }
        _ => Err(invalid(p)),
    }),
    ("KM", |m, p| match p {
        Prop::KM(komi) => {
            m.komi = Some(*komi);
            Ok(())
        }
        _ => Err(invalid(p)),
    }),
    ("RU", text!(ruleset)),
    ("GC", set_game_type),
];

fn invalid(prop: &Prop) -> Error {
    let value = match prop {
        Prop::Invalid(_, values) => values.join(","),
        other => format!("{other:?}"),
    };
    Error::InvalidMetadata {
        property: prop.identifier(),
        value,
    }
}

fn text(prop: &Prop) -> Result<String> {
    match prop {
        Prop::PC(v)
        | Prop::DT(v)
        | Prop::PB(v)
        | Prop::PW(v)
        | Prop::BR(v)
        | Prop::WR(v)
        | Prop::OT(v)
        | Prop::RE(v)
        | Prop::RU(v) => Ok(v.text.clone()),
        Prop::GC(v) => Ok(v.text.clone()),
        Prop::TM(seconds) => Ok(seconds.to_string()),
        other => Err(invalid(other)),
    }
}

/// `PC` holds the server name and game URL, e.g. `OGS: https://.../game/123`.
fn set_url(m: &mut GameMetadata, prop: &Prop) -> Result<()> {
    let value = text(prop)?;
    let url = value.split_once(": ").map_or(value.as_str(), |(_, url)| url).trim();
    m.game_id = url
        .rsplit('/')
        .next()
        .filter(|id| !id.is_empty())
        .map(str::to_string);
    m.url = Some(url.to_string());
    Ok(())
}

/// `RE` is `B+R`, `W+3.5`, `0` and so on; only a leading `B` or `W` names a winner.
fn set_result(m: &mut GameMetadata, prop: &Prop) -> Result<()> {
    let value = text(prop)?;
    m.winner = match value.chars().next() {
        Some('B') => Some(Color::Black),
        Some('W') => Some(Color::White),
        _ => None,
    };
    m.result = Some(value);
    Ok(())
}

/// `GC` is `<game type>,<ranked|unranked>`.
fn set_game_type(m: &mut GameMetadata, prop: &Prop) -> Result<()> {
    let value = text(prop)?;
    match value.split_once(',') {
        Some((game_type, ranked)) => {
            m.ranked = Some(ranked.trim() == "ranked");
            m.game_type = Some(game_type.to_string());
        }
        None => m.game_type = Some(value),
    }
    Ok(())
}

impl GameMetadata {
    pub fn from_tree(root: &GoNode) -> Result<Self> {
        let mut metadata = GameMetadata {
            num_moves: main_sequence(root).len() - 1,
            ..Default::default()
        };
        for prop in root.properties() {
            let ident = prop.identifier();
            if let Some((_, set)) = PROPERTY_FIELDS.iter().find(|(id, _)| *id == ident) {
                set(&mut metadata, prop)?;
            }
        }
        Ok(metadata)
    }
}
