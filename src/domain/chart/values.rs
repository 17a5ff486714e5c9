//! Container image heuristics over untyped chart values.
//!
//! Charts do not agree on where the image lives. The common conventions this
//! engine understands:
//!
//! ```yaml
//! # top-level, single container
//! image: dylanmei/zeppelin:0.7.2
//!
//! # top-level, split across keys
//! image: nginx
//! imageTag: "1.21"
//!
//! # top-level, structured
//! image:
//!   registry: docker.io        # sometimes missing
//!   repository: bitnami/mariadb
//!   tag: 10.1.32               # sometimes missing
//!
//! # nested per sub-chart
//! controller:
//!   image:
//!     repository: quay.io/kubernetes-ingress-controller/nginx-ingress-controller
//!     tag: "0.12.0"
//! ```
//!
//! Behavior is driven entirely by key presence; no schema is assumed. This is
//! a best-effort heuristic tuned to these conventions, not schema inference.

use serde_json::{Map, Value};

use crate::domain::workload::model::Container;
use crate::errors::{Result, WorkloadError};
use crate::image::{self, ImageRef};

/// Untyped chart configuration tree, exactly as carried on the resource.
pub type ChartValues = Map<String, Value>;

/// Locate the containers a chart's values declare.
///
/// A top-level `image` key makes the chart single-container, named after its
/// source path, and short-circuits all other keys. Otherwise every top-level
/// mapping is treated as a sub-chart block and yields one container: named by
/// its string-typed `name` field if present (else by its key), with its
/// `image` field decoded leniently. A block without a usable image still
/// counts as a container, with a zero [`ImageRef`]; the heuristic cannot tell
/// "not a container block" from "container block without a declared image".
pub fn extract_containers(values: &ChartValues, chart_source_path: &str) -> Result<Vec<Container>> {
    if values.is_empty() {
        return Ok(Vec::new());
    }

    // image info on the top level is associated directly with the chart
    if let Some(image) = values.get("image") {
        let image = decode_image_value(values, image)?;
        return Ok(vec![Container {
            name: chart_source_path.to_string(),
            image,
        }]);
    }

    let mut containers = Vec::new();
    for (key, value) in values {
        let Value::Object(block) = value else {
            // scalars cannot contain nested container definitions
            continue;
        };
        let name = block
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(key)
            .to_string();
        let image = decode_nested_image(block)?;
        containers.push(Container { name, image });
    }
    Ok(containers)
}

/// Strict decode of a top-level image value: an unsupported value type is a
/// malformed reference here, unlike on the nested path.
fn decode_image_value(siblings: &ChartValues, value: &Value) -> Result<ImageRef> {
    match value {
        Value::String(s) => decode_image_string(siblings, s),
        Value::Object(map) => decode_image_map(map),
        _ => Err(WorkloadError::MalformedImageReference),
    }
}

/// Lenient decode of a sub-chart block's image: absent or unsupported value
/// types yield a zero reference, not an error. Structural failures inside a
/// present image mapping still fail.
fn decode_nested_image(block: &ChartValues) -> Result<ImageRef> {
    match block.get("image") {
        Some(Value::String(s)) => decode_image_string(block, s),
        Some(Value::Object(map)) => decode_image_map(map),
        Some(_) | None => Ok(ImageRef::default()),
    }
}

/// A bare image string, combined with a string-typed `imageTag` sibling if
/// present, else a `tag` sibling, then handed to the parser.
fn decode_image_string(siblings: &ChartValues, value: &str) -> Result<ImageRef> {
    let tag = siblings
        .get("imageTag")
        .and_then(Value::as_str)
        .or_else(|| siblings.get("tag").and_then(Value::as_str));

    let combined = match tag {
        Some(tag) => format!("{}:{}", value, tag),
        None => value.to_string(),
    };
    Ok(image::parse_ref(&combined)?)
}

/// A structured image mapping: `repository` is required; `registry` and `tag`
/// are optional. When both optionals are present the reference is constructed
/// directly, bypassing the string parser.
fn decode_image_map(map: &ChartValues) -> Result<ImageRef> {
    let repository = map
        .get("repository")
        .and_then(Value::as_str)
        .ok_or(WorkloadError::MalformedImageReference)?;

    let registry = map.get("registry").and_then(Value::as_str);
    let tag = map.get("tag").and_then(Value::as_str);

    let combined = match (registry, tag) {
        (None, None) => repository.to_string(),
        (None, Some(tag)) => format!("{}:{}", repository, tag),
        (Some(registry), None) => format!("{}/{}", registry, repository),
        (Some(registry), Some(tag)) => {
            return Ok(ImageRef {
                domain: registry.to_string(),
                image: repository.to_string(),
                tag: tag.to_string(),
            });
        }
    };
    Ok(image::parse_ref(&combined)?)
}
