use crate::domain::{
    entities::{
        class_def::{ClassId, FieldType, MethodDef, MethodKind},
        class_model::ClassModel,
    },
    error::{DomainError, DomainResult},
    naming,
    policy::LIST_TYPE,
    value_objects::CrudOp,
};

/// Identifier type of a class: its `id` field, or `default_id_type`.
pub fn identifier_type(model: &ClassModel, class: ClassId, default_id_type: &str) -> FieldType {
    model
        .get(class)
        .field("id")
        .map(|f| f.ty.clone())
        .unwrap_or_else(|| FieldType::opaque(default_id_type))
}

/// The five CRUD methods for `subject`, in [`CrudOp::ALL`] order.
///
/// Bodies delegate per the subject layer's policy: to the same method one
/// layer down, or to the persistence collaborator at the bottom.
pub fn crud_methods(model: &ClassModel, subject: ClassId, default_id_type: &str) -> Vec<MethodDef> {
    let class = model.get(subject);
    let layer = class.layer();
    let entity = class.entity().unwrap_or(class.name()).to_string();
    let policy = layer.policy();

    let this = FieldType::Generated {
        class: subject,
        layer,
    };
    let id = identifier_type(model, subject, default_id_type);
    let param = naming::lower_first(&entity);

    CrudOp::ALL
        .iter()
        .map(|&op| {
            let method = MethodDef::new(
                op.method_name(&entity),
                MethodKind::Crud {
                    op,
                    entity: entity.clone(),
                },
                policy.crud_delegation(op, &entity),
            );
            match op {
                CrudOp::Create | CrudOp::Update => {
                    method.with_param(param.clone(), this.clone()).returning(this.clone())
                }
                CrudOp::Read => method.with_param("id", id.clone()).returning(this.clone()),
                CrudOp::Delete => method.with_param("id", id.clone()),
                CrudOp::List => method.returning(FieldType::Parameterized {
                    raw: LIST_TYPE.to_string(),
                    args: vec![this.clone()],
                }),
            }
        })
        .collect()
}

/// Append the CRUD set of `subject` to `target`.
///
/// Both classes must belong to the same layer.
pub fn append_crud(
    model: &mut ClassModel,
    target: ClassId,
    subject: ClassId,
    default_id_type: &str,
) -> DomainResult<()> {
    let (target_layer, subject_layer) = (model.get(target).layer(), model.get(subject).layer());
    if target_layer != subject_layer {
        return Err(DomainError::InvalidWiring(format!(
            "cannot add CRUD for {} class '{}' to {} class '{}'",
            subject_layer,
            model.get(subject).qualified_name(),
            target_layer,
            model.get(target).qualified_name()
        )));
    }

    let methods = crud_methods(model, subject, default_id_type);
    let def = model.get_mut(target);
    for method in methods {
        def.add_method(method);
    }
    Ok(())
}
