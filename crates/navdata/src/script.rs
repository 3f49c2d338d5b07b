//! The sidebar data script: wire format of the navigation data
//!
//! The generated site ships its navigation as a small script defining four
//! variables: the tree, the page index, and the two tooltip strings of the
//! panel-synchronisation toggle. Each tree entry is the heterogeneous triple
//! `[title, link, children]`, where `children` is `null` for a leaf, a
//! nested array of triples, or the bare name of a separately generated
//! subtree. The serde implementations below speak exactly that shape.

use std::fmt;

use serde::de::value::SeqAccessDeserializer;
use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Result;
use crate::index::NavIndex;
use crate::tree::{NavChildren, NavNode, NavTree};

/// Tooltip shown while panel synchronisation is enabled.
pub const SYNC_ON_MESSAGE: &str = "click to disable panel synchronisation";

/// Tooltip shown while panel synchronisation is disabled.
pub const SYNC_OFF_MESSAGE: &str = "click to enable panel synchronisation";

// ═══════════════════════════════════════════════════════════════════════
// Script Rendering
// ═══════════════════════════════════════════════════════════════════════

/// Render the complete sidebar data script.
///
/// The output defines `NAVTREE`, `NAVTREEINDEX`, `SYNCONMSG` and
/// `SYNCOFFMSG`, ready to be served next to the generated pages.
pub fn render_script(tree: &NavTree, index: &NavIndex) -> Result<String> {
    let mut script = String::new();
    script.push_str("var NAVTREE =\n");
    script.push_str(&serde_json::to_string_pretty(tree)?);
    script.push_str(";\n\nvar NAVTREEINDEX =\n");
    script.push_str(&serde_json::to_string_pretty(index)?);
    script.push_str(";\n\n");
    script.push_str(&format!("var SYNCONMSG = '{SYNC_ON_MESSAGE}';\n"));
    script.push_str(&format!("var SYNCOFFMSG = '{SYNC_OFF_MESSAGE}';\n"));

    Ok(script)
}

impl NavTree {
    /// Parse a tree from the JSON array form used in the script.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render the tree to its JSON array form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl NavIndex {
    /// Parse an index from the JSON array form used in the script.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render the index to its JSON array form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Serde: NavNode as [title, link, children]
// ═══════════════════════════════════════════════════════════════════════

impl Serialize for NavNode {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut triple = serializer.serialize_tuple(3)?;
        triple.serialize_element(&self.title)?;
        triple.serialize_element(&self.link)?;
        triple.serialize_element(&self.children)?;
        triple.end()
    }
}

impl<'de> Deserialize<'de> for NavNode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_tuple(3, NavNodeVisitor)
    }
}

struct NavNodeVisitor;

impl<'de> Visitor<'de> for NavNodeVisitor {
    type Value = NavNode;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a [title, link, children] triple")
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<NavNode, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let title = seq
            .next_element::<String>()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let link = seq
            .next_element::<String>()?
            .ok_or_else(|| de::Error::invalid_length(1, &self))?;
        let children = seq
            .next_element::<NavChildren>()?
            .ok_or_else(|| de::Error::invalid_length(2, &self))?;

        Ok(NavNode {
            title,
            link,
            children,
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Serde: NavChildren as null | string | array
// ═══════════════════════════════════════════════════════════════════════

impl Serialize for NavChildren {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            NavChildren::None => serializer.serialize_unit(),
            NavChildren::Inline(children) => children.serialize(serializer),
            NavChildren::External(subtree) => serializer.serialize_str(subtree),
        }
    }
}

impl<'de> Deserialize<'de> for NavChildren {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(NavChildrenVisitor)
    }
}

struct NavChildrenVisitor;

impl<'de> Visitor<'de> for NavChildrenVisitor {
    type Value = NavChildren;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("null, a subtree name, or a list of child entries")
    }

    fn visit_unit<E>(self) -> std::result::Result<NavChildren, E>
    where
        E: de::Error,
    {
        Ok(NavChildren::None)
    }

    fn visit_none<E>(self) -> std::result::Result<NavChildren, E>
    where
        E: de::Error,
    {
        Ok(NavChildren::None)
    }

    fn visit_str<E>(self, value: &str) -> std::result::Result<NavChildren, E>
    where
        E: de::Error,
    {
        Ok(NavChildren::External(value.to_owned()))
    }

    fn visit_seq<A>(self, seq: A) -> std::result::Result<NavChildren, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let children = Vec::<NavNode>::deserialize(SeqAccessDeserializer::new(seq))?;

        Ok(NavChildren::Inline(children))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Serde: NavTree and NavIndex as plain arrays
// ═══════════════════════════════════════════════════════════════════════

impl Serialize for NavTree {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.roots().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NavTree {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<NavNode>::deserialize(deserializer).map(NavTree::from)
    }
}

impl Serialize for NavIndex {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.entries().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NavIndex {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<String>::deserialize(deserializer).map(NavIndex::from)
    }
}
