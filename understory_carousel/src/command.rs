// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Operations addressable by name.
//!
//! Page scripts drive a carousel with strings (`"next"`, `"destroy"`, …).
//! [`Command`] parses those names; [`Carousel::dispatch`](crate::Carousel::dispatch)
//! and [`CarouselRegistry::dispatch`](crate::CarouselRegistry::dispatch) run
//! them.
//!
//! ```
//! use understory_carousel::command::Command;
//!
//! assert_eq!("next".parse(), Ok(Command::Next));
//! assert_eq!("setDimensions".parse(), Ok(Command::Resize));
//! assert!("explode".parse::<Command>().is_err());
//! ```

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

/// An operation a carousel exposes by name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Build and bind the carousel; no-op if already initialized.
    Initialize,
    /// Page backwards.
    Previous,
    /// Page forwards.
    Next,
    /// Re-measure the list.
    Resize,
    /// Report the committed index.
    CurrentSlide,
    /// Unbind and restore the original markup.
    Destroy,
}

impl Command {
    /// Every command, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Initialize,
        Self::Previous,
        Self::Next,
        Self::Resize,
        Self::CurrentSlide,
        Self::Destroy,
    ];

    /// Canonical name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Initialize => "init",
            Self::Previous => "previous",
            Self::Next => "next",
            Self::Resize => "resize",
            Self::CurrentSlide => "currentSlide",
            Self::Destroy => "destroy",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Command {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "init" | "initialize" => Ok(Self::Initialize),
            "previous" | "prev" => Ok(Self::Previous),
            "next" => Ok(Self::Next),
            "resize" | "setDimensions" => Ok(Self::Resize),
            "currentSlide" | "current" => Ok(Self::CurrentSlide),
            "destroy" => Ok(Self::Destroy),
            other => Err(DispatchError::UnknownCommand(other.into())),
        }
    }
}

/// Value produced by a dispatched command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    /// The command ran and has no value.
    Done,
    /// The committed index after the command.
    Slide(usize),
}

/// Error returned when a command cannot be dispatched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DispatchError {
    /// No command has this name.
    UnknownCommand(String),
    /// No carousel is attached under the given key.
    NotAttached,
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCommand(name) => write!(f, "unknown carousel command {name:?}"),
            Self::NotAttached => f.write_str("no carousel attached to this key"),
        }
    }
}

impl core::error::Error for DispatchError {}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn canonical_names_parse_back() {
        for command in Command::ALL {
            assert_eq!(command.name().parse(), Ok(command));
        }
    }

    #[test]
    fn aliases_parse() {
        assert_eq!("prev".parse(), Ok(Command::Previous));
        assert_eq!("initialize".parse(), Ok(Command::Initialize));
        assert_eq!("current".parse(), Ok(Command::CurrentSlide));
    }

    #[test]
    fn unknown_name_is_reported() {
        let err = "goTo".parse::<Command>().unwrap_err();
        assert_eq!(err, DispatchError::UnknownCommand("goTo".into()));
        assert_eq!(err.to_string(), "unknown carousel command \"goTo\"");
    }
}
