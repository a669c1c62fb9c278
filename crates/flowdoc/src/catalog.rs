//! Flowchart descriptions bundled with the library.
//!
//! These are the documents produced when no description files are given:
//! the student journey, the admin workflows and the complete system chart.

/// A bundled description: its catalog name and TOML source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bundled {
    name: &'static str,
    source: &'static str,
}

impl Bundled {
    /// Catalog name, as accepted by `--only`
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The TOML description text
    pub fn source(&self) -> &'static str {
        self.source
    }
}

static BUNDLED: [Bundled; 3] = [
    Bundled {
        name: "student",
        source: include_str!("../diagrams/student.toml"),
    },
    Bundled {
        name: "admin",
        source: include_str!("../diagrams/admin.toml"),
    },
    Bundled {
        name: "system",
        source: include_str!("../diagrams/system.toml"),
    },
];

/// Returns all bundled descriptions in generation order.
pub fn bundled() -> &'static [Bundled] {
    &BUNDLED
}

/// Looks up a bundled description by name.
pub fn find(name: &str) -> Option<Bundled> {
    BUNDLED.iter().copied().find(|bundled| bundled.name == name)
}

/// Returns the names of all bundled descriptions.
pub fn names() -> Vec<&'static str> {
    BUNDLED.iter().map(|bundled| bundled.name).collect()
}
