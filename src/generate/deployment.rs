use std::fmt::Display;

use k8s_openapi::api::apps::v1::{Deployment, DeploymentSpec};
use k8s_openapi::api::core::v1::{
    ConfigMapEnvSource, Container, ContainerPort, EnvFromSource, EnvVar, LocalObjectReference,
    PodSpec, PodTemplateSpec, SecretEnvSource,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};

use super::{non_empty, non_empty_map};
use crate::logging::Logger;
use crate::structs::WorkloadConfig;

/// Build a Deployment from a workload config
///
/// Nothing is validated here; a config with a dangling volume mount or a
/// selector that misses the pod labels gives a Deployment the cluster will
/// reject. Use `Verify` first if that matters.
pub fn build_workload(config: &WorkloadConfig) -> Deployment {
    build_workload_with(config, &Logger::new(module_path!()))
}

/// Build a Deployment, tracing each environment variable to `log`
pub fn build_workload_with(config: &WorkloadConfig, log: &Logger) -> Deployment {
    let container = Container {
        name: config.containerName.clone(),
        image: Some(config.image.clone()),
        image_pull_policy: Some(config.imagePullPolicy.as_str().into()),
        env_from: non_empty(env_sources(config)),
        env: non_empty(env_vars(config, log)),
        resources: Some(config.resources.to_requirements()),
        ports: Some(vec![ContainerPort {
            name: Some(config.portName.clone()),
            container_port: config.containerPort,
            ..ContainerPort::default()
        }]),
        liveness_probe: Some(config.livenessProbe.to_probe()),
        readiness_probe: Some(config.readinessProbe.to_probe()),
        volume_mounts: non_empty(config.volumeMounts.clone()),
        ..Container::default()
    };

    let pod_spec = PodSpec {
        containers: vec![container],
        volumes: non_empty(config.volumes.clone()),
        image_pull_secrets: config.imagePullSecretName.as_ref().map(|s| {
            vec![LocalObjectReference {
                name: Some(s.clone()),
            }]
        }),
        ..PodSpec::default()
    };
    let template = PodTemplateSpec {
        metadata: Some(ObjectMeta {
            labels: non_empty_map(config.podLabels.clone()),
            ..ObjectMeta::default()
        }),
        spec: Some(pod_spec),
    };

    Deployment {
        metadata: ObjectMeta {
            name: Some(config.name.clone()),
            namespace: Some(config.namespace.clone()),
            ..ObjectMeta::default()
        },
        spec: Some(DeploymentSpec {
            replicas: Some(config.replicas),
            selector: LabelSelector {
                match_labels: Some(config.matchLabels.clone()),
                ..LabelSelector::default()
            },
            template,
            ..DeploymentSpec::default()
        }),
        ..Deployment::default()
    }
}

/// Plain variables, sorted by name
fn env_vars(config: &WorkloadConfig, log: &Logger) -> Vec<EnvVar> {
    let mut res = vec![];
    for (k, v) in &config.env {
        log.trace("Adding env var to Deployment", &[
            ("deployment", &config.name as &dyn Display),
            ("name", k as &dyn Display),
            ("value", v as &dyn Display),
        ]);
        res.push(EnvVar {
            name: k.clone(),
            value: Some(v.clone()),
            ..EnvVar::default()
        });
    }
    res
}

/// All configmaps, then all secrets
///
/// Later sources override earlier ones on key collisions in kube,
/// so secrets win over configmaps.
fn env_sources(config: &WorkloadConfig) -> Vec<EnvFromSource> {
    let cms = config.envFromConfigMapNames.iter().map(|n| EnvFromSource {
        config_map_ref: Some(ConfigMapEnvSource {
            name: Some(n.clone()),
            ..ConfigMapEnvSource::default()
        }),
        ..EnvFromSource::default()
    });
    let secrets = config.envFromSecretNames.iter().map(|n| EnvFromSource {
        secret_ref: Some(SecretEnvSource {
            name: Some(n.clone()),
            ..SecretEnvSource::default()
        }),
        ..EnvFromSource::default()
    });
    cms.chain(secrets).collect()
}
