//! Typed pod-template projection: the container extraction path for the
//! standard workload kinds.

use crate::core::client::kube_resources::PodTemplateSpec;
use crate::domain::workload::model::{Container, ContainersOrExcuse};
use crate::image;

/// Project a pod template into a container list, all-or-nothing.
///
/// The first image that fails to parse discards everything collected so far
/// and the workload's result becomes the parser's error text. Downstream
/// consumers can therefore assume the list is either fully valid or absent
/// with a reason.
pub fn project(template: &PodTemplateSpec) -> ContainersOrExcuse {
    let specs = template
        .spec
        .as_ref()
        .map(|s| s.containers.as_slice())
        .unwrap_or_default();

    let mut containers = Vec::with_capacity(specs.len());
    for spec in specs {
        match image::parse_ref(spec.image.as_deref().unwrap_or_default()) {
            Ok(image) => containers.push(Container {
                name: spec.name.clone(),
                image,
            }),
            Err(err) => return ContainersOrExcuse::Excuse(err.to_string()),
        }
    }
    ContainersOrExcuse::Containers(containers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::core::v1::{Container as K8sContainer, PodSpec};

    fn template(images: &[(&str, Option<&str>)]) -> PodTemplateSpec {
        PodTemplateSpec {
            spec: Some(PodSpec {
                containers: images
                    .iter()
                    .map(|(name, image)| K8sContainer {
                        name: name.to_string(),
                        image: image.map(str::to_string),
                        ..Default::default()
                    })
                    .collect(),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn projects_in_order() {
        let got = project(&template(&[
            ("a", Some("nginx:1.21")),
            ("b", Some("quay.io/org/thing:v2")),
        ]));
        match got {
            ContainersOrExcuse::Containers(c) => {
                assert_eq!(c[0].name, "a");
                assert_eq!(c[1].image.domain, "quay.io");
            }
            ContainersOrExcuse::Excuse(e) => panic!("unexpected excuse: {e}"),
        }
    }

    #[test]
    fn first_parse_failure_discards_earlier_containers() {
        let got = project(&template(&[
            ("ok", Some("nginx:1.21")),
            ("bad", Some("not an image")),
            ("later", Some("redis")),
        ]));
        assert_eq!(
            got,
            ContainersOrExcuse::Excuse("unparseable image reference \"not an image\"".to_string())
        );
    }

    #[test]
    fn missing_image_string_degrades_workload() {
        let got = project(&template(&[("noimage", None)]));
        assert_eq!(
            got,
            ContainersOrExcuse::Excuse("image reference is empty".to_string())
        );
    }

    #[test]
    fn empty_template_yields_empty_list() {
        let got = project(&PodTemplateSpec::default());
        assert_eq!(got, ContainersOrExcuse::Containers(vec![]));
    }
}
