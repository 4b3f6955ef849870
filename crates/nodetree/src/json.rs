//! JSON front end.
//!
//! `serde_json` does the tokenizing: its deserializer pushes values into a
//! serde [`Visitor`], which translates them into [`TreeEvent`]s for a
//! [`TreeAssembler`]. Object keys name their values, array elements are
//! indexed after their array, and the top-level value takes the configured
//! root name.
//!
//! ```
//! use nodetree::{Node, json};
//!
//! let root = json::parse(r#"{"name": "John", "tags": ["a", "b"]}"#)?;
//! let tags = root.as_map().unwrap().get_child("tags")?;
//! assert_eq!(tags.children()[1], Node::scalar("tags[1]", "b"));
//! # Ok::<(), nodetree::NodeError>(())
//! ```
use alloc::{
    borrow::ToOwned,
    format,
    string::{String, ToString},
};
use core::fmt;

use serde::{
    Serialize, Serializer,
    de::{self, DeserializeSeed, MapAccess, SeqAccess, Visitor},
};
use tracing::{debug, warn};

use crate::{
    error::{NodeError, Result},
    event::{TreeAssembler, TreeEvent},
    node::{Node, Scalar},
    options::TreeOptions,
};

/// Parses `input` with default [`TreeOptions`].
///
/// # Errors
///
/// See [`parse_with_options`].
pub fn parse(input: &str) -> Result<Node> {
    parse_with_options(input, TreeOptions::default())
}

/// Parses one JSON document into a tree.
///
/// # Errors
///
/// - [`NodeError::UnsupportedElement`] for malformed JSON, trailing
///   characters, nesting beyond `serde_json`'s recursion limit or
///   [`TreeOptions::max_depth`], and binary payloads.
/// - [`NodeError::DuplicateKey`] when an object repeats a key.
pub fn parse_with_options(input: &str, options: TreeOptions) -> Result<Node> {
    debug!(len = input.len(), "parsing JSON document");
    let mut sink = EventSink {
        assembler: TreeAssembler::with_options(options),
        failure: None,
    };
    let mut deserializer = serde_json::Deserializer::from_str(input);
    let outcome = EventSeed(&mut sink)
        .deserialize(&mut deserializer)
        .and_then(|()| deserializer.end());

    // A tree error raised mid-stream also aborts serde; report the tree error.
    if let Some(err) = sink.failure {
        warn!(%err, "JSON document rejected by the tree builder");
        return Err(err);
    }
    if let Err(err) = outcome {
        warn!(%err, "JSON document failed to parse");
        return Err(NodeError::UnsupportedElement(format!("invalid JSON: {err}")));
    }
    let root = sink.assembler.finish()?;
    debug!(root = root.name(), "parsed JSON document");
    Ok(root)
}

/// Serializes a tree back into compact JSON text.
///
/// # Errors
///
/// [`NodeError::UnsupportedElement`] if `serde_json` refuses the output.
pub fn to_string(node: &Node) -> Result<String> {
    serde_json::to_string(node)
        .map_err(|err| NodeError::UnsupportedElement(format!("cannot serialize tree: {err}")))
}

struct EventSink {
    assembler: TreeAssembler,
    failure: Option<NodeError>,
}

impl EventSink {
    fn push<E: de::Error>(&mut self, event: TreeEvent) -> core::result::Result<(), E> {
        self.assembler.push(event).map_err(|err| self.fail(err))
    }

    fn fail<E: de::Error>(&mut self, err: NodeError) -> E {
        let de_err = E::custom(&err);
        self.failure = Some(err);
        de_err
    }
}

struct EventSeed<'a>(&'a mut EventSink);

impl<'de> DeserializeSeed<'de> for EventSeed<'_> {
    type Value = ();

    fn deserialize<D>(self, deserializer: D) -> core::result::Result<(), D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for EventSeed<'_> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> core::result::Result<(), E> {
        self.0.push(TreeEvent::Value(Scalar::Bool(v)))
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_i64<E: de::Error>(self, v: i64) -> core::result::Result<(), E> {
        self.0.push(TreeEvent::Value(Scalar::Number(v as f64)))
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_u64<E: de::Error>(self, v: u64) -> core::result::Result<(), E> {
        self.0.push(TreeEvent::Value(Scalar::Number(v as f64)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> core::result::Result<(), E> {
        self.0.push(TreeEvent::Value(Scalar::Number(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> core::result::Result<(), E> {
        self.0.push(TreeEvent::Value(Scalar::Text(v.to_owned())))
    }

    fn visit_string<E: de::Error>(self, v: String) -> core::result::Result<(), E> {
        self.0.push(TreeEvent::Value(Scalar::Text(v)))
    }

    fn visit_bytes<E: de::Error>(self, _v: &[u8]) -> core::result::Result<(), E> {
        Err(self.0.fail(NodeError::UnsupportedElement(
            "binary data is not supported".to_string(),
        )))
    }

    fn visit_unit<E: de::Error>(self) -> core::result::Result<(), E> {
        self.0.push(TreeEvent::Value(Scalar::Null))
    }

    fn visit_none<E: de::Error>(self) -> core::result::Result<(), E> {
        self.visit_unit()
    }

    fn visit_some<D>(self, deserializer: D) -> core::result::Result<(), D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A>(self, mut seq: A) -> core::result::Result<(), A::Error>
    where
        A: SeqAccess<'de>,
    {
        let sink = self.0;
        sink.push(TreeEvent::ListStart)?;
        while seq.next_element_seed(EventSeed(&mut *sink))?.is_some() {}
        sink.push(TreeEvent::ListEnd)
    }

    fn visit_map<A>(self, mut map: A) -> core::result::Result<(), A::Error>
    where
        A: MapAccess<'de>,
    {
        let sink = self.0;
        sink.push(TreeEvent::MapStart)?;
        while let Some(key) = map.next_key::<String>()? {
            sink.push(TreeEvent::Key(key))?;
            map.next_value_seed(EventSeed(&mut *sink))?;
        }
        sink.push(TreeEvent::MapEnd)
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        match self {
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Null => serializer.serialize_unit(),
            Self::Number(n) => serializer.serialize_f64(*n),
            Self::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// Maps become objects keyed by child name, lists become arrays, and scalars
/// become plain values. List child names are not written.
impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        match self {
            Self::Scalar(n) => n.value().serialize(serializer),
            Self::List(n) => serializer.collect_seq(n.children()),
            Self::Map(n) => {
                serializer.collect_map(n.children().iter().map(|child| (child.name(), child)))
            }
        }
    }
}
