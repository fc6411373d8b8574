use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use neo_core::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    /// Permissions granted to a contract call.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CallFlags: u8 {
        const NONE = 0b0000_0000;
        const READ_STATES = 0b0000_0001;
        const WRITE_STATES = 0b0000_0010;
        const ALLOW_CALL = 0b0000_0100;
        const ALLOW_NOTIFY = 0b0000_1000;
        const STATES = Self::READ_STATES.bits() | Self::WRITE_STATES.bits();
        const READ_ONLY = Self::READ_STATES.bits() | Self::ALLOW_CALL.bits();
        const ALL = Self::STATES.bits() | Self::ALLOW_CALL.bits() | Self::ALLOW_NOTIFY.bits();
    }
}

impl Default for CallFlags {
    fn default() -> Self {
        CallFlags::NONE
    }
}

const SINGLE_FLAGS: [(CallFlags, &str); 4] = [
    (CallFlags::READ_STATES, "ReadStates"),
    (CallFlags::WRITE_STATES, "WriteStates"),
    (CallFlags::ALLOW_CALL, "AllowCall"),
    (CallFlags::ALLOW_NOTIFY, "AllowNotify"),
];

impl CallFlags {
    /// Like `from_bits` but with a typed error for undefined bits.
    pub fn try_from_byte(value: u8) -> Result<Self, Error> {
        Self::from_bits(value)
            .ok_or_else(|| Error::invalid_argument(format!("undefined call flags {value:#04x}")))
    }

    fn composite_name(&self) -> Option<&'static str> {
        [
            (Self::NONE, "None"),
            (Self::STATES, "States"),
            (Self::READ_ONLY, "ReadOnly"),
            (Self::ALL, "All"),
        ]
        .into_iter()
        .find(|(flags, _)| flags == self)
        .map(|(_, name)| name)
    }
}

impl fmt::Display for CallFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.composite_name() {
            return f.write_str(name);
        }
        let names: Vec<&str> = SINGLE_FLAGS
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        f.write_str(&names.join(", "))
    }
}

impl FromStr for CallFlags {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = CallFlags::NONE;
        for part in s.split(',').map(str::trim) {
            flags |= match part {
                "None" => CallFlags::NONE,
                "ReadStates" => CallFlags::READ_STATES,
                "WriteStates" => CallFlags::WRITE_STATES,
                "AllowCall" => CallFlags::ALLOW_CALL,
                "AllowNotify" => CallFlags::ALLOW_NOTIFY,
                "States" => CallFlags::STATES,
                "ReadOnly" => CallFlags::READ_ONLY,
                "All" => CallFlags::ALL,
                _ => return Err(Error::invalid_format(format!("unknown call flag: {part}"))),
            };
        }
        Ok(flags)
    }
}

impl Serialize for CallFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CallFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
