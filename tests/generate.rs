extern crate kubewright;
extern crate serde_yaml;
mod common;

use common::{fixture, setup};

use kubewright::{Kind, Logger, Manifest};
use serde_yaml::Value;

fn build(kind: Kind, file: &str) -> Manifest {
    setup();
    kind.build(&fixture(file), true, &Logger::new("generate-test")).unwrap()
}

fn yaml(mf: &Manifest) -> Value {
    serde_yaml::from_str(&mf.to_yaml().unwrap()).unwrap()
}

#[test]
fn deployment_from_file() {
    let mf = build(Kind::Deployment, "deployment.yml");
    assert_eq!(mf.kind(), Kind::Deployment);
    assert_eq!(mf.name(), "webapp");
    let v = yaml(&mf);
    assert_eq!(v["apiVersion"], Value::from("apps/v1"));
    assert_eq!(v["kind"], Value::from("Deployment"));
    assert_eq!(v["spec"]["replicas"], Value::from(2));

    let pod = &v["spec"]["template"]["spec"];
    assert_eq!(pod["imagePullSecrets"][0]["name"], Value::from("registry"));
    let c = &pod["containers"][0];
    assert_eq!(c["imagePullPolicy"], Value::from("Always"));
    // sorted by name
    assert_eq!(c["env"][0]["name"], Value::from("DATABASE_HOST"));
    assert_eq!(c["env"][1]["name"], Value::from("RUST_LOG"));
    assert_eq!(c["envFrom"][0]["configMapRef"]["name"], Value::from("webapp-env"));
    assert_eq!(c["envFrom"][1]["secretRef"]["name"], Value::from("webapp-creds"));
    assert_eq!(c["resources"]["limits"]["cpu"], Value::from("2"));
    assert_eq!(c["resources"]["limits"]["memory"], Value::from("1Gi"));
    assert_eq!(c["resources"]["requests"]["cpu"], Value::from("250m"));
    assert_eq!(c["livenessProbe"]["initialDelaySeconds"], Value::from(15));
    assert_eq!(c["readinessProbe"]["httpGet"]["path"], Value::from("/ready"));
    assert_eq!(c["volumeMounts"][0]["readOnly"], Value::from(true));
}

#[test]
fn deployment_output_is_stable() {
    let a = build(Kind::Deployment, "deployment.yml").to_yaml().unwrap();
    let b = build(Kind::Deployment, "deployment.yml").to_yaml().unwrap();
    assert_eq!(a, b);
}

#[test]
fn ingress_from_file() {
    let v = yaml(&build(Kind::Ingress, "ingress.yml"));
    assert_eq!(v["apiVersion"], Value::from("networking.k8s.io/v1"));
    assert_eq!(v["spec"]["ingressClassName"], Value::from("nginx"));
    let rule = &v["spec"]["rules"][0];
    assert_eq!(rule["host"], Value::from("webapp.example.com"));
    let path = &rule["http"]["paths"][0];
    assert_eq!(path["path"], Value::from("/"));
    assert_eq!(path["pathType"], Value::from("Prefix"));
    assert_eq!(path["backend"]["service"]["port"]["name"], Value::from("http"));
}

#[test]
fn secret_and_configmap_from_file() {
    let s = yaml(&build(Kind::Secret, "secret.yml"));
    assert_eq!(s["type"], Value::from("Opaque"));
    assert_eq!(s["stringData"]["DATABASE_PASSWORD"], Value::from("s3cr3t: with colon"));

    let cm = yaml(&build(Kind::ConfigMap, "configmap.yml"));
    assert_eq!(cm["kind"], Value::from("ConfigMap"));
    assert_eq!(cm["data"]["app.ini"], Value::from("[core]\nworkers = 4\n"));
}

#[test]
fn pushsecret_from_file() {
    let v = yaml(&build(Kind::PushSecret, "pushsecret.yml"));
    assert_eq!(v["apiVersion"], Value::from("external-secrets.io/v1alpha1"));
    assert_eq!(v["kind"], Value::from("PushSecret"));
    assert_eq!(v["metadata"]["namespace"], Value::from("apps"));
    let spec = &v["spec"];
    assert_eq!(spec["refreshInterval"], Value::from("1h"));
    assert_eq!(spec["secretStoreRefs"][0]["kind"], Value::from("ClusterSecretStore"));
    assert_eq!(spec["selector"]["secret"]["name"], Value::from("webapp-creds"));
    let m = &spec["data"][1]["match"];
    assert_eq!(m["secretKey"], Value::from("API_TOKEN"));
    assert_eq!(m["remoteRef"]["remoteKey"], Value::from("apps/webapp"));
    assert_eq!(m["remoteRef"]["property"], Value::from("API_TOKEN"));
}

#[test]
fn externalsecret_from_file() {
    let v = yaml(&build(Kind::ExternalSecret, "externalsecret.yml"));
    assert_eq!(v["apiVersion"], Value::from("external-secrets.io/v1beta1"));
    let spec = &v["spec"];
    assert_eq!(spec["refreshInterval"], Value::from("15m"));
    assert_eq!(spec["secretStoreRef"]["kind"], Value::from("SecretStore"));
    assert_eq!(spec["target"]["name"], Value::from("webapp-creds"));
    assert_eq!(spec["data"][0]["secretKey"], Value::from("API_TOKEN"));
    assert_eq!(spec["data"][0]["remoteRef"]["key"], Value::from("apps/webapp"));
    assert_eq!(spec["data"][0]["remoteRef"]["property"], Value::from("api_token"));
}
