//! Java source rendering of generated classes.
//!
//! Types are always written fully qualified, so rendered files carry no
//! imports.

use stratum_core::{
    VERSION,
    application::{ApplicationError, GeneratedModel},
    domain::{
        ClassDefinition, ClassModel, Delegation, FieldDef, MethodDef, MethodKind, Tag,
        policy::PERSISTENCE_CONTEXT_FIELD,
    },
};

const INDENT: &str = "    ";

/// Annotation text for a tag.
pub fn annotation(tag: &Tag) -> String {
    match tag {
        Tag::PersistentEntity => "@javax.persistence.Entity".into(),
        Tag::Table { name } => format!("@javax.persistence.Table(name = \"{name}\")"),
        Tag::OneToOne => "@javax.persistence.OneToOne".into(),
        Tag::OneToMany => "@javax.persistence.OneToMany".into(),
        Tag::SerializableRoot => "@javax.xml.bind.annotation.XmlRootElement".into(),
        Tag::Component { singleton: true } => {
            "@org.springframework.stereotype.Component\n@org.springframework.context.annotation.Scope(\"singleton\")".into()
        }
        Tag::Component { singleton: false } => "@org.springframework.stereotype.Component".into(),
        Tag::Injected => "@org.springframework.beans.factory.annotation.Autowired".into(),
        Tag::PersistenceContext => "@javax.persistence.PersistenceContext".into(),
        Tag::Bean { name } => {
            format!("@org.springframework.context.annotation.Bean(name = \"{name}\")")
        }
        Tag::Configuration => "@org.springframework.context.annotation.Configuration".into(),
        Tag::Custom(name) if name.starts_with('@') => name.clone(),
        Tag::Custom(name) => format!("@{name}"),
    }
}

/// Render one class of a generated model as a Java compilation unit.
pub fn render_class(
    generated: &GeneratedModel,
    class: &ClassDefinition,
) -> Result<String, ApplicationError> {
    let model = &generated.model;
    let mut out = SourceBuffer::default();

    if !class.package().is_empty() {
        out.line(0, &format!("package {};", class.package()));
        out.blank();
    }
    out.line(
        0,
        &format!(
            "// Generated by stratum {VERSION} for app {} (run {}). Do not edit.",
            generated.app_name, generated.run_id
        ),
    );
    out.annotations(0, class.tags());
    out.line(0, &format!("public class {} {{", class.name()));

    for field in class.fields() {
        out.blank();
        render_field(&mut out, model, field);
    }
    for method in class.methods() {
        out.blank();
        render_method(&mut out, model, class, method)?;
    }

    out.line(0, "}");
    Ok(out.finish())
}

fn render_field(out: &mut SourceBuffer, model: &ClassModel, field: &FieldDef) {
    out.annotations(1, &field.tags);
    out.line(
        1,
        &format!("private {} {};", model.render_type(&field.ty), field.name),
    );
}

fn render_method(
    out: &mut SourceBuffer,
    model: &ClassModel,
    class: &ClassDefinition,
    method: &MethodDef,
) -> Result<(), ApplicationError> {
    let returns = method
        .returns
        .as_ref()
        .map_or_else(|| "void".to_string(), |ty| model.render_type(ty));
    let params: Vec<String> = method
        .params
        .iter()
        .map(|p| format!("{} {}", model.render_type(&p.ty), p.name))
        .collect();

    out.annotations(1, &method.tags);
    out.line(
        1,
        &format!("public {returns} {}({}) {{", method.name, params.join(", ")),
    );
    for statement in body(model, class, method)? {
        out.line(2, &statement);
    }
    out.line(1, "}");
    Ok(())
}

fn body(
    model: &ClassModel,
    class: &ClassDefinition,
    method: &MethodDef,
) -> Result<Vec<String>, ApplicationError> {
    let args: Vec<&str> = method.params.iter().map(|p| p.name.as_str()).collect();
    let returns = method.returns.is_some();

    let statements = match &method.delegation {
        Delegation::ReadField { field } => vec![format!("return this.{field};")],
        Delegation::WriteField { field } => {
            let value = args.first().copied().unwrap_or(field.as_str());
            vec![format!("this.{field} = {value};")]
        }
        Delegation::Facade { method: target, .. } => {
            let dependency = class.dependency_field().ok_or_else(|| {
                ApplicationError::EmissionFailed {
                    reason: format!(
                        "'{}' delegates '{}' but has no injected dependency",
                        class.qualified_name(),
                        method.name
                    ),
                }
            })?;
            let call = format!("this.{}.{target}({});", dependency.name, args.join(", "));
            vec![if returns { format!("return {call}") } else { call }]
        }
        Delegation::PersistenceCollaborator { operation } => {
            persistence_call(model, class, method, operation, &args)?
        }
        Delegation::Instantiate { class: bean } => {
            vec![format!("return new {}();", model.get(*bean).qualified_name())]
        }
        Delegation::None if returns => {
            vec!["throw new UnsupportedOperationException();".to_string()]
        }
        Delegation::None => Vec::new(),
    };
    Ok(statements)
}

fn persistence_call(
    model: &ClassModel,
    class: &ClassDefinition,
    method: &MethodDef,
    operation: &str,
    args: &[&str],
) -> Result<Vec<String>, ApplicationError> {
    let context = class
        .fields()
        .iter()
        .find(|f| f.has_tag(&Tag::PersistenceContext))
        .map_or(PERSISTENCE_CONTEXT_FIELD, |f| f.name.as_str());
    let (simple, entity) = match &method.kind {
        MethodKind::Crud { entity, .. } => model
            .domain_class(entity, class.layer())
            .map(|id| (entity.as_str(), model.get(id).qualified_name())),
        _ => None,
    }
    .ok_or_else(|| ApplicationError::EmissionFailed {
        reason: format!(
            "'{}.{}' reaches the persistence context without a persistent entity",
            class.qualified_name(),
            method.name
        ),
    })?;
    let arg = args.first().copied().unwrap_or("id");

    let statements = match operation {
        "persist" => vec![
            format!("this.{context}.persist({arg});"),
            format!("return {arg};"),
        ],
        "find" => vec![format!("return this.{context}.find({entity}.class, {arg});")],
        "merge" => vec![format!("return this.{context}.merge({arg});")],
        "remove" => vec![format!(
            "this.{context}.remove(this.{context}.find({entity}.class, {arg}));"
        )],
        "query" => vec![format!(
            "return this.{context}.createQuery(\"select e from {simple} e\", {entity}.class).getResultList();"
        )],
        other => vec![format!("return this.{context}.{other}({});", args.join(", "))],
    };
    Ok(statements)
}

#[derive(Default)]
struct SourceBuffer {
    text: String,
}

impl SourceBuffer {
    fn line(&mut self, depth: usize, content: &str) {
        for line in content.lines() {
            for _ in 0..depth {
                self.text.push_str(INDENT);
            }
            self.text.push_str(line);
            self.text.push('\n');
        }
    }

    fn blank(&mut self) {
        self.text.push('\n');
    }

    fn annotations(&mut self, depth: usize, tags: &[Tag]) {
        for tag in tags {
            self.line(depth, &annotation(tag));
        }
    }

    fn finish(self) -> String {
        self.text
    }
}
