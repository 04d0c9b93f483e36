use std::fmt::Debug;

use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::JSONSchemaProps;
use kube::{CustomResourceExt, Resource};
use serde::{de::DeserializeOwned, Serialize};

use manifest_utils::to_snake_case;

/// A custom resource that can be rendered by a manifest data source.
///
/// The group, version and kind come from the `#[kube(...)]` declaration of the
/// resource; the CRD generated from it is the source of the data source schema.
pub trait ManifestKind: Resource<DynamicType = ()> + CustomResourceExt {
    type Spec: Serialize + DeserializeOwned + Clone + Debug + PartialEq + Send + Sync + 'static;

    /// One-line description of the data source.
    const DESCRIPTION: &'static str;

    fn manifest_api_version() -> String {
        <Self as Resource>::api_version(&()).into_owned()
    }

    fn manifest_kind() -> String {
        <Self as Resource>::kind(&()).into_owned()
    }

    fn is_namespaced() -> bool {
        Self::crd().spec.scope == "Namespaced"
    }

    /// `<provider>_<group>_<kind>_<version>_manifest`
    fn data_source_type_name(provider_type_name: &str) -> String {
        let group = <Self as Resource>::group(&()).replace(['.', '-'], "_");
        format!(
            "{}_{}_{}_{}_manifest",
            provider_type_name,
            group,
            to_snake_case(&<Self as Resource>::kind(&())),
            <Self as Resource>::version(&()),
        )
    }

    /// The `openAPIV3Schema` of the served version.
    fn openapi_schema() -> Option<JSONSchemaProps> {
        let version = <Self as Resource>::version(&());
        Self::crd()
            .spec
            .versions
            .into_iter()
            .find(|v| v.name == version)?
            .schema?
            .open_api_v3_schema
    }
}
