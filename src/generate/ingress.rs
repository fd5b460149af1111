use k8s_openapi::api::networking::v1::{
    HTTPIngressPath, HTTPIngressRuleValue, Ingress, IngressBackend, IngressRule,
    IngressServiceBackend, IngressSpec, ServiceBackendPort,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

use crate::structs::{BackendPort, RoutingConfig};

/// Build a single rule, single path Ingress
///
/// The host is not checked for dns syntax.
pub fn build_route(config: &RoutingConfig) -> Ingress {
    let port = match &config.backendPort {
        BackendPort::Name(n) => ServiceBackendPort {
            name: Some(n.clone()),
            number: None,
        },
        BackendPort::Number(n) => ServiceBackendPort {
            name: None,
            number: Some(*n),
        },
    };
    let path = HTTPIngressPath {
        path: Some(config.path.clone()),
        path_type: config.pathType.clone(),
        backend: IngressBackend {
            service: Some(IngressServiceBackend {
                name: config.serviceName.clone(),
                port: Some(port),
            }),
            ..IngressBackend::default()
        },
    };
    let rule = IngressRule {
        host: Some(config.host()),
        http: Some(HTTPIngressRuleValue { paths: vec![path] }),
    };

    Ingress {
        metadata: ObjectMeta {
            name: Some(config.name.clone()),
            namespace: Some(config.namespace.clone()),
            ..ObjectMeta::default()
        },
        spec: Some(IngressSpec {
            ingress_class_name: Some(config.ingressClassName.clone()),
            rules: Some(vec![rule]),
            ..IngressSpec::default()
        }),
        ..Ingress::default()
    }
}

#[cfg(test)]
mod tests {
    use super::build_route;
    use crate::structs::{BackendPort, RoutingConfig};

    fn config(port: BackendPort) -> RoutingConfig {
        RoutingConfig {
            name: "web".into(),
            namespace: "apps".into(),
            dnsLabel: "svc".into(),
            baseDomain: "example.com".into(),
            serviceName: "web-svc".into(),
            backendPort: port,
            path: "/api".into(),
            pathType: "Exact".into(),
            ingressClassName: "nginx".into(),
        }
    }

    #[test]
    fn host_is_composed() {
        let ing = build_route(&config("http".into()));
        let spec = ing.spec.unwrap();
        assert_eq!(spec.ingress_class_name.as_deref(), Some("nginx"));
        let rules = spec.rules.unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].host.as_deref(), Some("svc.example.com"));
        let paths = &rules[0].http.as_ref().unwrap().paths;
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].path.as_deref(), Some("/api"));
        assert_eq!(paths[0].path_type, "Exact");
    }

    #[test]
    fn named_port() {
        let ing = build_route(&config("http".into()));
        let rules = ing.spec.unwrap().rules.unwrap();
        let svc = rules[0].http.as_ref().unwrap().paths[0].backend.service.clone().unwrap();
        assert_eq!(svc.name, "web-svc");
        let port = svc.port.unwrap();
        assert_eq!(port.name.as_deref(), Some("http"));
        assert_eq!(port.number, None);
    }

    #[test]
    fn numeric_port() {
        let ing = build_route(&config(8080.into()));
        let rules = ing.spec.unwrap().rules.unwrap();
        let svc = rules[0].http.as_ref().unwrap().paths[0].backend.service.clone().unwrap();
        let port = svc.port.unwrap();
        assert_eq!(port.name, None);
        assert_eq!(port.number, Some(8080));
    }

    #[test]
    fn host_is_not_checked() {
        let mut cfg = config("http".into());
        cfg.dnsLabel = "Not A Label".into();
        cfg.baseDomain = "".into();
        let ing = build_route(&cfg);
        let rules = ing.spec.unwrap().rules.unwrap();
        assert_eq!(rules[0].host.as_deref(), Some("Not A Label."));
    }
}
