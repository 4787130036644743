// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::person::Person;
use std::fmt::{self, Display};

/// Heterogeneous message fixture.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum TestData {
    Person(Person),
    Temperature(i32),
    Label(String),
}

impl TestData {
    #[must_use]
    pub const fn is_person(&self) -> bool {
        matches!(self, Self::Person(_))
    }
}

impl Display for TestData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Person(p) => write!(f, "{p}"),
            Self::Temperature(t) => write!(f, "Temperature[{t}]"),
            Self::Label(l) => write!(f, "Label[{l}]"),
        }
    }
}

pub fn person_alice() -> TestData {
    TestData::Person(Person::new("Alice".to_string(), 25))
}

pub fn person_bob() -> TestData {
    TestData::Person(Person::new("Bob".to_string(), 30))
}

pub fn person_charlie() -> TestData {
    TestData::Person(Person::new("Charlie".to_string(), 35))
}

pub fn temperature(degrees: i32) -> TestData {
    TestData::Temperature(degrees)
}

pub fn label(text: &str) -> TestData {
    TestData::Label(text.to_string())
}
