//! Typed workload shapes for the supported manifest kinds.
//!
//! Only the spine down to the container list is typed; everything else at
//! each nesting level is captured in a flattened [`Mapping`] so that
//! re-serialization round-trips fields this tool never looks at
//! (metadata, replicas, selectors, schedules, probes, ...).

use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;

use crate::error::ManifestError;

/// A single container entry in a pod template.
///
/// `name` and `image` are the only fields this tool reads or writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Container {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image: String,
    #[serde(flatten)]
    pub extra: Mapping,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PodSpec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub containers: Vec<Container>,
    #[serde(flatten)]
    pub extra: Mapping,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PodTemplate {
    #[serde(default)]
    pub spec: PodSpec,
    #[serde(flatten)]
    pub extra: Mapping,
}

/// The `spec` of a Deployment or Job, and of a CronJob's job template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkloadSpec {
    #[serde(default)]
    pub template: PodTemplate,
    #[serde(flatten)]
    pub extra: Mapping,
}

/// An `apps/v1` Deployment. Containers live at
/// `spec.template.spec.containers`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Deployment {
    #[serde(default)]
    pub spec: WorkloadSpec,
    #[serde(flatten)]
    pub extra: Mapping,
}

/// A `batch/v1` Job. Same container path as a Deployment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Job {
    #[serde(default)]
    pub spec: WorkloadSpec,
    #[serde(flatten)]
    pub extra: Mapping,
}

/// A CronJob. Containers live one level deeper, at
/// `spec.jobTemplate.spec.template.spec.containers`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CronJob {
    #[serde(default)]
    pub spec: CronJobSpec,
    #[serde(flatten)]
    pub extra: Mapping,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CronJobSpec {
    #[serde(default)]
    pub job_template: JobTemplate,
    #[serde(flatten)]
    pub extra: Mapping,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobTemplate {
    #[serde(default)]
    pub spec: WorkloadSpec,
    #[serde(flatten)]
    pub extra: Mapping,
}

/// Capability shared by all supported workload kinds: locate the container
/// list inside the kind's own nesting.
///
/// The returned slice aliases the manifest's storage, so mutations are
/// visible when the manifest is serialized again. Adding a kind means
/// implementing this trait and registering one detector label; the patcher
/// never changes.
pub trait Workload {
    /// Mutable view of the pod template's containers, in declaration order.
    ///
    /// A workload with zero containers is never valid in this domain, so an
    /// empty list is an error rather than an empty slice.
    fn containers_mut(&mut self) -> Result<&mut [Container], ManifestError>;
}

fn containers_view(containers: &mut Vec<Container>) -> Result<&mut [Container], ManifestError> {
    if containers.is_empty() {
        return Err(ManifestError::NoContainers);
    }
    Ok(containers.as_mut_slice())
}

impl Workload for Deployment {
    fn containers_mut(&mut self) -> Result<&mut [Container], ManifestError> {
        containers_view(&mut self.spec.template.spec.containers)
    }
}

impl Workload for Job {
    fn containers_mut(&mut self) -> Result<&mut [Container], ManifestError> {
        containers_view(&mut self.spec.template.spec.containers)
    }
}

impl Workload for CronJob {
    fn containers_mut(&mut self) -> Result<&mut [Container], ManifestError> {
        containers_view(&mut self.spec.job_template.spec.template.spec.containers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::fixtures;

    #[test]
    fn deployment_containers_in_declaration_order() {
        let mut m: Deployment = serde_yaml::from_str(fixtures::DEPLOYMENT_YAML).unwrap();
        let containers = m.containers_mut().unwrap();

        assert_eq!(containers.len(), 2);
        assert_eq!(containers[0].name, "nginx");
        assert_eq!(containers[0].image, "nginx:1.16.0");
        assert_eq!(containers[1].name, "test");
        assert_eq!(containers[1].image, "test:1");
    }

    #[test]
    fn job_containers_found() {
        let mut m: Job = serde_yaml::from_str(fixtures::JOB_YAML).unwrap();
        let containers = m.containers_mut().unwrap();

        assert_eq!(containers.len(), 1);
        assert_eq!(containers[0].name, "job-container");
        assert_eq!(containers[0].image, "busybox");
    }

    #[test]
    fn cronjob_containers_found_under_job_template() {
        let mut m: CronJob = serde_yaml::from_str(fixtures::CRONJOB_YAML).unwrap();
        let containers = m.containers_mut().unwrap();

        assert_eq!(containers.len(), 1);
        assert_eq!(containers[0].name, "hello");
        assert_eq!(containers[0].image, "busybox");
    }

    #[test]
    fn empty_container_list_is_an_error() {
        let yaml = "kind: Deployment\nspec:\n  template:\n    spec:\n      containers: []\n";
        let mut m: Deployment = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(
            m.containers_mut(),
            Err(ManifestError::NoContainers)
        ));
    }

    #[test]
    fn missing_spec_is_an_error_not_a_parse_failure() {
        // Mirrors zero-value semantics: a bare document parses, then fails
        // at the accessor.
        let mut m: Deployment = serde_yaml::from_str("kind: Deployment\n").unwrap();
        assert!(matches!(
            m.containers_mut(),
            Err(ManifestError::NoContainers)
        ));
    }

    #[test]
    fn mutation_through_view_reaches_the_parent() {
        let mut m: Deployment = serde_yaml::from_str(fixtures::DEPLOYMENT_YAML).unwrap();
        m.containers_mut().unwrap()[0].image = "patched:1".to_string();
        assert_eq!(m.spec.template.spec.containers[0].image, "patched:1");
    }
}
