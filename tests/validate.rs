extern crate kubewright;
mod common;

use common::{fixture, setup};

use kubewright::{ErrorKind, Kind, Logger};

#[test]
fn fixtures_verify() {
    setup();
    for (kind, file) in &[
        (Kind::Deployment, "deployment.yml"),
        (Kind::Ingress, "ingress.yml"),
        (Kind::Secret, "secret.yml"),
        (Kind::ConfigMap, "configmap.yml"),
        (Kind::PushSecret, "pushsecret.yml"),
        (Kind::ExternalSecret, "externalsecret.yml"),
    ] {
        assert!(kind.verify_file(&fixture(file)).is_ok(), "{} should verify", file);
    }
}

#[test]
fn dangling_mount_is_rejected() {
    setup();
    let err = Kind::Deployment.verify_file(&fixture("deployment-dangling.yml")).unwrap_err();
    match err.kind() {
        ErrorKind::InvalidConfig(kind, _) => assert_eq!(kind, "deployment"),
        k => panic!("unexpected error {:?}", k),
    }
}

#[test]
fn build_without_verify_is_unchecked() {
    setup();
    let log = Logger::new("validate-test");
    let path = fixture("deployment-dangling.yml");
    assert!(Kind::Deployment.build(&path, false, &log).is_ok());
    assert!(Kind::Deployment.build(&path, true, &log).is_err());
}

#[test]
fn unknown_fields_are_rejected() {
    setup();
    let log = Logger::new("validate-test");
    assert!(Kind::Secret.build(&fixture("unknown-field.yml"), false, &log).is_err());
}

#[test]
fn missing_file_errors() {
    setup();
    assert!(Kind::ConfigMap.verify_file(&fixture("nope.yml")).is_err());
}

#[test]
fn wrong_kind_for_file() {
    setup();
    // a secret config lacks every workload field
    assert!(Kind::Deployment.verify_file(&fixture("secret.yml")).is_err());
}
