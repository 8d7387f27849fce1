//! Image patching over a container list.

use tracing::{debug, info};

use super::workload::Container;

/// Set `image` on every container whose name is in `filter`.
///
/// An empty filter matches every container. Names in the filter that match
/// no container are not an error; the result just reports no change.
/// Returns true iff at least one container's image field was assigned.
pub fn set_image(containers: &mut [Container], image: &str, filter: &[String]) -> bool {
    let mut changed = false;

    for container in containers.iter_mut() {
        if !filter.is_empty() && !filter.iter().any(|name| name == &container.name) {
            info!(
                container = %container.name,
                "container not in filter, skipping"
            );
            continue;
        }

        debug!("found container in manifest");
        info!(
            container = %container.name,
            current_image = %container.image,
            new_image = %image,
            "updating container image"
        );

        container.image = image.to_string();
        changed = true;
    }

    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::fixtures;
    use crate::manifest::workload::{CronJob, Deployment, Job, Workload};

    fn filter(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_filter_updates_every_container() {
        let mut m: Deployment = serde_yaml::from_str(fixtures::DEPLOYMENT_YAML).unwrap();

        let changed = set_image(m.containers_mut().unwrap(), "new-image:2", &[]);
        assert!(changed);
        assert_eq!(m.spec.template.spec.containers[0].image, "new-image:2");
        assert_eq!(m.spec.template.spec.containers[1].image, "new-image:2");
    }

    #[test]
    fn single_name_filter_updates_only_that_container() {
        let mut m: Deployment = serde_yaml::from_str(fixtures::DEPLOYMENT_YAML).unwrap();
        set_image(m.containers_mut().unwrap(), "new-image:2", &[]);

        let changed = set_image(m.containers_mut().unwrap(), "new-image:3", &filter(&["test"]));
        assert!(changed);
        assert_eq!(m.spec.template.spec.containers[0].image, "new-image:2");
        assert_eq!(m.spec.template.spec.containers[1].image, "new-image:3");
    }

    #[test]
    fn absent_name_filter_changes_nothing() {
        let mut m: Deployment = serde_yaml::from_str(fixtures::DEPLOYMENT_YAML).unwrap();

        let changed = set_image(
            m.containers_mut().unwrap(),
            "new-image:10",
            &filter(&["not-exist"]),
        );
        assert!(!changed);
        assert_eq!(m.spec.template.spec.containers[0].image, "nginx:1.16.0");
        assert_eq!(m.spec.template.spec.containers[1].image, "test:1");
    }

    #[test]
    fn multi_name_filter_updates_each_match_independently() {
        let mut m: Deployment = serde_yaml::from_str(fixtures::DEPLOYMENT_YAML).unwrap();

        let changed = set_image(
            m.containers_mut().unwrap(),
            "new-image:4",
            &filter(&["nginx", "test"]),
        );
        assert!(changed);
        assert_eq!(m.spec.template.spec.containers[0].image, "new-image:4");
        assert_eq!(m.spec.template.spec.containers[1].image, "new-image:4");
    }

    #[test]
    fn job_empty_filter_and_absent_filter() {
        let mut job: Job = serde_yaml::from_str(fixtures::JOB_YAML).unwrap();

        assert!(set_image(job.containers_mut().unwrap(), "new-image:2", &[]));
        assert_eq!(job.spec.template.spec.containers[0].image, "new-image:2");

        assert!(!set_image(
            job.containers_mut().unwrap(),
            "new-image:2",
            &filter(&["other-container"]),
        ));
    }

    #[test]
    fn cronjob_filtering() {
        let mut cronjob: CronJob = serde_yaml::from_str(fixtures::CRONJOB_YAML).unwrap();

        assert!(set_image(cronjob.containers_mut().unwrap(), "new-image:3", &[]));
        assert_eq!(
            cronjob.spec.job_template.spec.template.spec.containers[0].image,
            "new-image:3"
        );

        assert!(set_image(
            cronjob.containers_mut().unwrap(),
            "new-image:4",
            &filter(&["hello"]),
        ));
        assert_eq!(
            cronjob.spec.job_template.spec.template.spec.containers[0].image,
            "new-image:4"
        );

        assert!(!set_image(
            cronjob.containers_mut().unwrap(),
            "new-image:5",
            &filter(&["non-existent"]),
        ));
    }

    #[test]
    fn rewriting_the_same_image_still_counts_as_changed() {
        // No old == new suppression: an assignment is a change.
        let mut m: Deployment = serde_yaml::from_str(fixtures::DEPLOYMENT_YAML).unwrap();
        assert!(set_image(
            m.containers_mut().unwrap(),
            "nginx:1.16.0",
            &filter(&["nginx"]),
        ));
    }
}
