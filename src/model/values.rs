use anyhow::{Result, anyhow, bail};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// An integer option with a human-readable label, e.g. a transpose level in a picker.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NamedInteger {
    pub name: String,
    pub value: i32,
}

impl NamedInteger {
    pub fn new(name: impl Into<String>, value: i32) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl Ord for NamedInteger {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .cmp(&other.value)
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl PartialOrd for NamedInteger {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for NamedInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A key plus modifiers, written as `ctrl+shift+alt+KEY`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct KeyBinding {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyBinding {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn alt(mut self) -> Self {
        self.alt = true;
        self
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            f.write_str("ctrl+")?;
        }
        if self.shift {
            f.write_str("shift+")?;
        }
        if self.alt {
            f.write_str("alt+")?;
        }
        f.write_str(&self.key)
    }
}

impl FromStr for KeyBinding {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let key = parts
            .pop()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| anyhow!("Key binding '{}' has no key..!", s))?;

        let mut binding = KeyBinding::new(key.to_uppercase());
        for modifier in parts {
            match modifier.to_lowercase().as_str() {
                "ctrl" | "control" => binding.ctrl = true,
                "shift" => binding.shift = true,
                "alt" => binding.alt = true,
                other => bail!("Unknown modifier '{}' in key binding '{}'..!", other, s),
            }
        }

        Ok(binding)
    }
}

impl Serialize for KeyBinding {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for KeyBinding {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A table entry that is either a category header or an element belonging to one.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CategorizedElement {
    pub name: String,
    pub category: bool,
}

/// How a table row should be painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowTone {
    Plain,
    Category,
    Selected,
}

impl CategorizedElement {
    pub fn category(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: true,
        }
    }

    pub fn element(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: false,
        }
    }

    /// Selection wins over the category highlight.
    pub fn row_tone(&self, selected: bool) -> RowTone {
        if selected {
            RowTone::Selected
        } else if self.category {
            RowTone::Category
        } else {
            RowTone::Plain
        }
    }
}
