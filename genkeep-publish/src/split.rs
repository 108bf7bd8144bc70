//! The generate-once extension pattern.
//!
//! Models and persistence interfaces are split into a base that is
//! regenerated on every run and an extension that is scaffolded once and
//! then belongs to the user:
//!
//! | Generated          | Base (always written)    | Extension (created once)                  |
//! |--------------------|--------------------------|-------------------------------------------|
//! | `gen/Order`        | `gen/OrderBase`          | `<parent>.model.Order`                    |
//! | `gen/OrderMapper`  | `gen/OrderMapperBase`    | `<parent>.persistence.OrderMapper`, `<parent>.service.OrderService` |
//! | `gen/OrderMapper.xml` | `gen/OrderMapperBase.xml` | `<parent>.persistence/OrderMapper.xml` |
//!
//! Criteria classes are never split. References between artifacts are
//! rewritten so that bases keep pointing at the right types.

use genkeep_core::{ArtifactKind, EXAMPLE_SUFFIX, MAPPER_SUFFIX, strip_role_suffix};

use crate::{
    Artifact, ArtifactRegistry, PathResolver, PlannedWrite, PublishError, ReferenceRewriter,
    ShellError,
    scaffold::{DescriptorExtension, MapperExtension, ModelExtension, Scaffold, ServiceFacade},
    shell::ShellCallback,
};

/// Plans the writes for one artifact.
pub struct SplitPublisher<'a> {
    paths: &'a PathResolver,
    shell: &'a dyn ShellCallback,
}

impl<'a> SplitPublisher<'a> {
    pub fn new(paths: &'a PathResolver, shell: &'a dyn ShellCallback) -> Self {
        Self { paths, shell }
    }

    /// Plan `artifact`, looking up the artifacts it references in `registry`.
    pub fn plan(
        &self,
        artifact: &Artifact,
        registry: &ArtifactRegistry,
    ) -> Result<Vec<PlannedWrite>, PublishError> {
        match artifact.kind() {
            ArtifactKind::Model => self.plan_model(artifact),
            ArtifactKind::Mapper => self.plan_mapper(artifact, registry),
            ArtifactKind::Example => self.plan_example(artifact),
            ArtifactKind::Descriptor => self.plan_descriptor(artifact, registry),
        }
    }

    /// Plan `artifact` without splitting: one candidate write at its
    /// generated location.
    pub fn plan_unsplit(&self, artifact: &Artifact) -> Result<Vec<PlannedWrite>, PublishError> {
        let dir = self.directory_of(artifact)?;
        Ok(vec![PlannedWrite::candidate(
            dir.join(artifact.file_name()),
            artifact.content(),
        )])
    }

    fn plan_model(&self, artifact: &Artifact) -> Result<Vec<PlannedWrite>, PublishError> {
        let name = artifact.logical_name();
        let base_name = self.paths.base_name(name);
        let namespace = artifact.target_namespace();
        let extension_namespace = self.paths.model_namespace(namespace)?;

        let content = ReferenceRewriter::new()
            .rule(name, base_name.as_str())
            .apply(artifact.content());
        let base = PlannedWrite::base(
            self.directory_of(artifact)?
                .join(self.paths.source_file(&base_name)),
            content,
        );

        let extension = ModelExtension {
            namespace: &extension_namespace,
            base_namespace: namespace,
            name,
            base_name: &base_name,
            extension: &self.paths.layout().source_extension,
        };
        let extension_dir = self
            .shell
            .directory(artifact.target_project(), &extension_namespace)?;

        Ok(vec![base, extension.planned(&extension_dir)])
    }

    fn plan_mapper(
        &self,
        artifact: &Artifact,
        registry: &ArtifactRegistry,
    ) -> Result<Vec<PlannedWrite>, PublishError> {
        let mapper = artifact.logical_name();
        let mapper_base = self.paths.base_name(mapper);
        let model_name = strip_role_suffix(mapper, &[MAPPER_SUFFIX]);
        let model = self.referenced_model(model_name, artifact, registry)?;

        let namespace = artifact.target_namespace();
        let persistence_namespace = self.paths.persistence_namespace(namespace)?;
        let service_namespace = self.paths.service_namespace(namespace)?;
        let model_namespace = model.target_namespace();
        let model_extension_namespace = self.paths.model_namespace(model_namespace)?;

        let content = ReferenceRewriter::new()
            .pin(model_namespace.qualify(&format!("{model_name}{EXAMPLE_SUFFIX}")))
            .rule(
                model_namespace.qualify(model_name),
                model_extension_namespace.qualify(model_name),
            )
            .rule(mapper, mapper_base.as_str())
            .apply(artifact.content());
        let base = PlannedWrite::base(
            self.directory_of(artifact)?
                .join(self.paths.source_file(&mapper_base)),
            content,
        );

        let source_extension = &self.paths.layout().source_extension;
        let project = artifact.target_project();
        let service = ServiceFacade {
            namespace: &service_namespace,
            mapper_namespace: &persistence_namespace,
            model: model_name,
            mapper,
            extension: source_extension,
        };
        let extension = MapperExtension {
            namespace: &persistence_namespace,
            base_namespace: namespace,
            name: mapper,
            base_name: &mapper_base,
            extension: source_extension,
        };

        Ok(vec![
            base,
            service.planned(&self.shell.directory(project, &service_namespace)?),
            extension.planned(&self.shell.directory(project, &persistence_namespace)?),
        ])
    }

    fn plan_example(&self, artifact: &Artifact) -> Result<Vec<PlannedWrite>, PublishError> {
        let dir = self.directory_of(artifact)?;
        Ok(vec![PlannedWrite::base(
            dir.join(artifact.file_name()),
            artifact.content(),
        )])
    }

    fn plan_descriptor(
        &self,
        artifact: &Artifact,
        registry: &ArtifactRegistry,
    ) -> Result<Vec<PlannedWrite>, PublishError> {
        let name = artifact.logical_name();
        let Some(mapper) = registry.find(name, ArtifactKind::Mapper) else {
            tracing::debug!(
                file = artifact.file_name(),
                "no persistence interface in batch, publishing unsplit"
            );
            return self.plan_unsplit(artifact);
        };
        let model_name = strip_role_suffix(name, &[MAPPER_SUFFIX]);
        let model = self.referenced_model(model_name, artifact, registry)?;

        let persistence_namespace = self.paths.persistence_namespace(mapper.target_namespace())?;
        let mapper_type = persistence_namespace.qualify(name);
        let model_namespace = model.target_namespace();
        let model_extension_namespace = self.paths.model_namespace(model_namespace)?;

        let content = ReferenceRewriter::new()
            .rule(mapper.target_namespace().qualify(name), mapper_type.as_str())
            .pin(model_namespace.qualify(&format!("{model_name}{EXAMPLE_SUFFIX}")))
            .rule(
                model_namespace.qualify(model_name),
                model_extension_namespace.qualify(model_name),
            )
            .apply(artifact.content());
        let base = PlannedWrite::base(
            self.directory_of(artifact)?
                .join(self.paths.descriptor_file(&self.paths.base_name(name))),
            content,
        );

        let extension = DescriptorExtension {
            name,
            mapper_type: &mapper_type,
            extension: &self.paths.layout().descriptor_extension,
            encoding: artifact.charset()?.name(),
        };
        let extension_dir = self
            .shell
            .directory(artifact.target_project(), &persistence_namespace)?;

        Ok(vec![base, extension.planned(&extension_dir)])
    }

    fn referenced_model<'r>(
        &self,
        model_name: &str,
        referrer: &Artifact,
        registry: &'r ArtifactRegistry,
    ) -> Result<&'r Artifact, ShellError> {
        registry
            .find(model_name, ArtifactKind::Model)
            .ok_or_else(|| ShellError::MissingReference {
                name: model_name.to_string(),
                referrer: referrer.file_name().to_string(),
            })
    }

    fn directory_of(&self, artifact: &Artifact) -> Result<std::path::PathBuf, ShellError> {
        self.shell
            .directory(artifact.target_project(), artifact.target_namespace())
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::*;
    use crate::{WriteRole, testing::RecordingShell};

    const MAPPER: &str = "package com.acme.dao.gen;\n\
                          \n\
                          import com.acme.model.gen.Order;\n\
                          import com.acme.model.gen.OrderExample;\n\
                          \n\
                          public interface OrderMapper {\n\
                          \x20   List<Order> selectByExample(OrderExample example);\n\
                          }\n";

    fn registry() -> ArtifactRegistry {
        let mut registry = ArtifactRegistry::new();
        registry.register_all([
            Artifact::new(
                "app",
                "com.acme.model.gen",
                "Order.java",
                "package com.acme.model.gen;\n\npublic class Order {\n    public Order() {}\n}\n",
                ArtifactKind::Model,
            ),
            Artifact::new("app", "com.acme.dao.gen", "OrderMapper.java", MAPPER, ArtifactKind::Mapper),
        ]);
        registry
    }

    fn paths_of(writes: &[PlannedWrite]) -> Vec<(&Path, WriteRole)> {
        writes.iter().map(|w| (w.path.as_path(), w.role)).collect()
    }

    #[test]
    fn test_model_split() {
        let paths = PathResolver::default();
        let shell = RecordingShell::new("/out");
        let registry = registry();
        let model = registry.find("Order", ArtifactKind::Model).unwrap();

        let writes = SplitPublisher::new(&paths, &shell).plan(model, &registry).unwrap();

        assert_eq!(
            paths_of(&writes),
            [
                (Path::new("/out/app/com/acme/model/gen/OrderBase.java"), WriteRole::Base),
                (Path::new("/out/app/com/acme/model/Order.java"), WriteRole::Extension),
            ]
        );
        assert!(writes[0].content.contains("public class OrderBase {"));
        assert!(writes[0].content.contains("public OrderBase() {}"));
        assert!(writes[1].content.contains("public class Order extends OrderBase {"));
    }

    #[test]
    fn test_mapper_split_rewrites_references() {
        let paths = PathResolver::default();
        let shell = RecordingShell::new("/out");
        let registry = registry();
        let mapper = registry.find("OrderMapper", ArtifactKind::Mapper).unwrap();

        let writes = SplitPublisher::new(&paths, &shell).plan(mapper, &registry).unwrap();

        assert_eq!(
            paths_of(&writes),
            [
                (
                    Path::new("/out/app/com/acme/dao/gen/OrderMapperBase.java"),
                    WriteRole::Base
                ),
                (
                    Path::new("/out/app/com/acme/service/OrderService.java"),
                    WriteRole::Extension
                ),
                (
                    Path::new("/out/app/com/acme/persistence/OrderMapper.java"),
                    WriteRole::Extension
                ),
            ]
        );
        let base = &writes[0].content;
        assert!(base.contains("import com.acme.model.Order;"));
        assert!(base.contains("import com.acme.model.gen.OrderExample;"));
        assert!(base.contains("public interface OrderMapperBase {"));
        assert!(base.contains("List<Order> selectByExample(OrderExample example);"));
    }

    #[test]
    fn test_mapper_without_model_is_skipped() {
        let paths = PathResolver::default();
        let shell = RecordingShell::new("/out");
        let mut registry = ArtifactRegistry::new();
        registry.register(Artifact::new(
            "app",
            "com.acme.dao.gen",
            "OrderMapper.java",
            MAPPER,
            ArtifactKind::Mapper,
        ));
        let mapper = registry.find("OrderMapper", ArtifactKind::Mapper).unwrap();

        let err = SplitPublisher::new(&paths, &shell)
            .plan(mapper, &registry)
            .unwrap_err();

        assert!(matches!(
            err,
            PublishError::Shell(ShellError::MissingReference { .. })
        ));
    }

    #[test]
    fn test_descriptor_split() {
        let paths = PathResolver::default();
        let shell = RecordingShell::new("/out");
        let mut registry = registry();
        registry.register(Artifact::new(
            "res",
            "com.acme.dao.gen",
            "OrderMapper.xml",
            "<mapper namespace=\"com.acme.dao.gen.OrderMapper\" >\n\
             <resultMap type=\"com.acme.model.gen.Order\" />\n\
             <select parameterType=\"com.acme.model.gen.OrderExample\" />\n\
             </mapper>\n",
            ArtifactKind::Descriptor,
        ));
        let descriptor = registry.find("OrderMapper", ArtifactKind::Descriptor).unwrap();

        let writes = SplitPublisher::new(&paths, &shell)
            .plan(descriptor, &registry)
            .unwrap();

        assert_eq!(
            writes[0].path,
            PathBuf::from("/out/res/com/acme/dao/gen/OrderMapperBase.xml")
        );
        assert_eq!(
            writes[1].path,
            PathBuf::from("/out/res/com/acme/persistence/OrderMapper.xml")
        );
        let base = &writes[0].content;
        assert!(base.contains("namespace=\"com.acme.persistence.OrderMapper\""));
        assert!(base.contains("type=\"com.acme.model.Order\""));
        assert!(base.contains("parameterType=\"com.acme.model.gen.OrderExample\""));
        assert!(writes[1].content.contains("<mapper namespace=\"com.acme.persistence.OrderMapper\" >"));
    }

    #[test]
    fn test_descriptor_without_mapper_is_unsplit() {
        let paths = PathResolver::default();
        let shell = RecordingShell::new("/out");
        let mut registry = ArtifactRegistry::new();
        registry.register(Artifact::new(
            "res",
            "com.acme.dao.gen",
            "AuditMapper.xml",
            "<mapper/>",
            ArtifactKind::Descriptor,
        ));
        let descriptor = registry.find("AuditMapper", ArtifactKind::Descriptor).unwrap();

        let writes = SplitPublisher::new(&paths, &shell)
            .plan(descriptor, &registry)
            .unwrap();

        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].role, WriteRole::Candidate);
        assert_eq!(
            writes[0].path,
            PathBuf::from("/out/res/com/acme/dao/gen/AuditMapper.xml")
        );
    }

    #[test]
    fn test_example_written_verbatim() {
        let paths = PathResolver::default();
        let shell = RecordingShell::new("/out");
        let registry = ArtifactRegistry::new();
        let example = Artifact::new(
            "app",
            "com.acme.model.gen",
            "OrderExample.java",
            "public class OrderExample {}",
            ArtifactKind::Example,
        );

        let writes = SplitPublisher::new(&paths, &shell)
            .plan(&example, &registry)
            .unwrap();

        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].role, WriteRole::Base);
        assert_eq!(writes[0].content, "public class OrderExample {}");
    }

    #[test]
    fn test_shallow_namespace_is_fatal() {
        let paths = PathResolver::default();
        let shell = RecordingShell::new("/out");
        let registry = ArtifactRegistry::new();
        let model = Artifact::new("app", "gen", "Order.java", "", ArtifactKind::Model);

        let err = SplitPublisher::new(&paths, &shell)
            .plan(&model, &registry)
            .unwrap_err();

        assert!(!err.is_recoverable());
    }
}
