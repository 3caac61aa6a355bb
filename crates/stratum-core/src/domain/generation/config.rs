use crate::domain::{
    entities::{
        app::App,
        class_def::{ClassId, ClassKind, Delegation, FieldType, MethodDef, MethodKind, Tag},
        class_model::ClassModel,
    },
    error::DomainResult,
    naming,
    policy::{CONFIG_PACKAGE, CONFIG_SUFFIX},
    value_objects::Layer,
};

/// Create the dependency-injection configuration class, `<base>.config.<App>Config`.
///
/// The class starts without beans; [`add_bean`] adds one factory method per
/// facade as the facades are built.
pub fn build_config(model: &mut ClassModel, app: &App) -> DomainResult<ClassId> {
    let package = naming::join_package(app.base_namespace().unwrap_or(""), CONFIG_PACKAGE);
    let name = format!("{}{}", naming::upper_first(&app.name), CONFIG_SUFFIX);

    let id = model.define(ClassKind::Configuration, Layer::Transport, &package, &name)?;
    let def = model.get_mut(id);
    def.add_tag(Tag::Configuration);
    def.mark_built();
    Ok(id)
}

/// Add a bean factory for `bean` to `config`.
///
/// The method is named after the bean class in camelCase and returns a new
/// instance. Adding the same bean twice is a no-op.
pub fn add_bean(model: &mut ClassModel, config: ClassId, bean: ClassId) -> DomainResult<()> {
    let bean_def = model.get(bean);
    let name = naming::lower_first(bean_def.name());
    let returns = FieldType::Generated {
        class: bean,
        layer: bean_def.layer(),
    };

    let def = model.get_mut(config);
    if def.method(&name).is_some() {
        return Ok(());
    }
    def.add_method(
        MethodDef::new(
            name.clone(),
            MethodKind::BeanFactory { class: bean },
            Delegation::Instantiate { class: bean },
        )
        .returning(returns)
        .with_tag(Tag::Bean { name }),
    );
    Ok(())
}

/// Bean factory methods of a configuration class.
pub fn beans(model: &ClassModel, config: ClassId) -> Vec<ClassId> {
    model
        .get(config)
        .methods()
        .iter()
        .filter_map(|m| match m.kind {
            MethodKind::BeanFactory { class } => Some(class),
            _ => None,
        })
        .collect()
}
