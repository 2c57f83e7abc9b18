use tracing::debug;

use crate::application::generators::Generator;
use crate::application::variables::{VariablePool, presets};
use crate::domain::{Architecture, ArtifactPlan, DomainError, RelativePath, Value};

/// One Dockerfile per supported architecture, from a shared base.
#[derive(Debug, Clone, Copy, Default)]
pub struct DockerfileGenerator;

pub(super) fn dockerfile() -> Box<dyn Generator> {
    Box::new(DockerfileGenerator)
}

impl Generator for DockerfileGenerator {
    fn key(&self) -> &'static str {
        "dockerfile"
    }

    fn description(&self) -> &'static str {
        "Multi-stage container build, one file per architecture"
    }

    fn plan(&self, pool: &VariablePool) -> Result<Vec<ArtifactPlan>, DomainError> {
        let base = presets::dockerfile_base(pool);
        let dir = base
            .get("CI_DOCKERFILE_DIR")
            .and_then(Value::as_text)
            .unwrap_or_default()
            .to_string();

        Architecture::ALL
            .iter()
            .map(|&arch| {
                let path = RelativePath::join(&dir, &format!("Dockerfile.{arch}"))?;
                debug!(%arch, path = %path, "Planned Dockerfile");
                let variables = presets::dockerfile_from(base.clone(), arch);
                Ok(ArtifactPlan::new(path, self.key(), variables))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ServiceConfig;

    #[test]
    fn plans_one_file_per_architecture() {
        let mut config = ServiceConfig::named("svc");
        config.ci.dockerfile_dir = Some("docker".into());
        config.build.builder_image.arm64 = "arm64v8/rust".into();
        let pool = VariablePool::new(config);

        let plans = DockerfileGenerator.plan(&pool).unwrap();

        let paths: Vec<String> = plans.iter().map(|p| p.path.to_string()).collect();
        assert_eq!(paths, vec!["docker/Dockerfile.amd64", "docker/Dockerfile.arm64"]);
        assert_eq!(plans[0].variables["GOARCH"], Value::from("amd64"));
        assert_eq!(plans[1].variables["BUILDER_IMAGE"], Value::from("arm64v8/rust"));
    }
}
