//! Common utilities shared across CLI commands.

use clap::ValueEnum;
use mosaic::{Contact, Vector};
use serde::Serialize;

/// Output format for command reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Serializable view of a [`Contact`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContactReport {
    pub normal: [f64; 2],
    pub depth: f64,
}

impl ContactReport {
    /// `None` for [`Contact::NONE`].
    pub fn from_contact(contact: Contact) -> Option<Self> {
        if contact.is_none() {
            None
        } else {
            Some(Self {
                normal: point(contact.normal),
                depth: contact.depth,
            })
        }
    }
}

pub fn point(v: Vector) -> [f64; 2] {
    [v.x, v.y]
}

/// Pretty JSON for stdout.
pub fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
