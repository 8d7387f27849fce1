//! Manifest kind detection and the kind-polymorphic manifest wrapper.

pub mod patch;
pub mod workload;

pub use patch::set_image;
pub use workload::{Container, CronJob, Deployment, Job, Workload};

use std::fmt;

use serde::Deserialize;

use crate::error::ManifestError;

/// The closed set of workload kinds this tool knows how to patch.
///
/// The labels here drive both detection and dispatch: adding a kind means
/// adding a variant, its label, and the matching [`Manifest`] case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    Deployment,
    Job,
    CronJob,
}

impl ManifestKind {
    pub const ALL: [ManifestKind; 3] = [
        ManifestKind::Deployment,
        ManifestKind::Job,
        ManifestKind::CronJob,
    ];

    /// The canonical `kind` label, as it appears in the manifest.
    pub fn as_str(self) -> &'static str {
        match self {
            ManifestKind::Deployment => "Deployment",
            ManifestKind::Job => "Job",
            ManifestKind::CronJob => "CronJob",
        }
    }

    /// Classify a raw YAML document by its `kind` field.
    ///
    /// Only the `kind` field is parsed; unknown fields never cause failure
    /// here. The comparison is case-sensitive and exact.
    pub fn detect(raw: &str) -> Result<Self, ManifestError> {
        let probe: KindProbe =
            serde_yaml::from_str(raw).map_err(|source| ManifestError::Malformed { source })?;

        match Self::ALL.into_iter().find(|k| k.as_str() == probe.kind) {
            Some(kind) => Ok(kind),
            None => Err(ManifestError::UnsupportedKind { kind: probe.kind }),
        }
    }
}

impl fmt::Display for ManifestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimal structural projection used only for first-pass classification.
#[derive(Debug, Deserialize)]
struct KindProbe {
    #[serde(default)]
    kind: String,
}

/// A fully parsed workload manifest of one of the supported kinds.
#[derive(Debug, Clone)]
pub enum Manifest {
    Deployment(Deployment),
    Job(Job),
    CronJob(CronJob),
}

impl Manifest {
    /// Detect the kind of `raw` and parse it into the matching typed shape.
    pub fn parse(raw: &str) -> Result<Self, ManifestError> {
        let malformed = |source| ManifestError::Malformed { source };

        Ok(match ManifestKind::detect(raw)? {
            ManifestKind::Deployment => {
                Manifest::Deployment(serde_yaml::from_str(raw).map_err(malformed)?)
            }
            ManifestKind::Job => Manifest::Job(serde_yaml::from_str(raw).map_err(malformed)?),
            ManifestKind::CronJob => {
                Manifest::CronJob(serde_yaml::from_str(raw).map_err(malformed)?)
            }
        })
    }

    pub fn kind(&self) -> ManifestKind {
        match self {
            Manifest::Deployment(_) => ManifestKind::Deployment,
            Manifest::Job(_) => ManifestKind::Job,
            Manifest::CronJob(_) => ManifestKind::CronJob,
        }
    }

    /// Mutable view of this manifest's containers (see [`Workload`]).
    pub fn containers_mut(&mut self) -> Result<&mut [Container], ManifestError> {
        match self {
            Manifest::Deployment(m) => m.containers_mut(),
            Manifest::Job(m) => m.containers_mut(),
            Manifest::CronJob(m) => m.containers_mut(),
        }
    }

    /// Patch the image on containers matching `filter` (empty means all).
    ///
    /// Returns the changed flag from [`set_image`]; fails only if the
    /// container list cannot be resolved.
    pub fn set_image(&mut self, image: &str, filter: &[String]) -> Result<bool, ManifestError> {
        Ok(set_image(self.containers_mut()?, image, filter))
    }

    /// Full structural re-encode back to YAML.
    pub fn to_yaml(&self) -> Result<String, ManifestError> {
        let serialize = |source| ManifestError::Serialize { source };
        match self {
            Manifest::Deployment(m) => serde_yaml::to_string(m).map_err(serialize),
            Manifest::Job(m) => serde_yaml::to_string(m).map_err(serialize),
            Manifest::CronJob(m) => serde_yaml::to_string(m).map_err(serialize),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    pub const DEPLOYMENT_YAML: &str = r#"
apiVersion: apps/v1
kind: Deployment
metadata:
  name: nginx-deployment
spec:
  replicas: 3
  selector:
    matchLabels:
      app: nginx
  template:
    metadata:
      labels:
        app: nginx
    spec:
      containers:
      - name: nginx
        image: nginx:1.16.0
        ports:
        - containerPort: 80
      - name: test
        image: test:1
"#;

    pub const JOB_YAML: &str = r#"
apiVersion: batch/v1
kind: Job
metadata:
  name: example-job
spec:
  template:
    metadata:
      name: example-job
    spec:
      containers:
      - name: job-container
        image: busybox
        command: ["sh", "-c", "echo Hello Kubernetes! && sleep 30"]
      restartPolicy: Never
"#;

    pub const CRONJOB_YAML: &str = r#"
apiVersion: batch/v1beta1
kind: CronJob
metadata:
  name: hello
spec:
  schedule: "*/1 * * * *"
  jobTemplate:
    spec:
      template:
        spec:
          containers:
          - name: hello
            image: busybox
            args:
            - /bin/sh
            - -c
            - date; echo Hello from the Kubernetes cluster
          restartPolicy: OnFailure
"#;
}
