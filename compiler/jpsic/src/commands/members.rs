//! The `members` command.

use jpsi::{Member, ModifierOwner, Named, PsiClass, PsiMethod, PsiResult, StubFlags, Typed};

use super::{fail, open, Options};

/// Print every class of the file with its merged fields, methods and member
/// classes. Synthetic members are tagged with the provider that added them.
pub fn print_members(path: &str, options: &Options) {
    let (_manager, file) = open(path, options);
    let mut out = String::new();
    let result = file.classes().and_then(|classes| {
        classes
            .iter()
            .try_for_each(|class| describe_class(class, 0, &mut out))
    });
    if let Err(e) = result {
        fail(path, &e);
    }
    print!("{out}");
}

fn describe_class(class: &PsiClass, depth: usize, out: &mut String) -> PsiResult<()> {
    let indent = "  ".repeat(depth);
    let name = match class.qualified_name()? {
        Some(name) => name,
        None => class.name()?.unwrap_or_else(|| "<anonymous>".to_owned()),
    };
    let keyword = if class.is_annotation_type()? {
        "@interface"
    } else if class.is_interface()? {
        "interface"
    } else if class.is_enum()? {
        "enum"
    } else if class.is_record()? {
        "record"
    } else {
        "class"
    };
    out.push_str(&format!("{indent}{keyword} {name}\n"));

    for field in class.fields()? {
        let type_text = field.type_text()?.unwrap_or_default();
        let name = field.name()?.unwrap_or_default();
        out.push_str(&format!(
            "{indent}  field {}{type_text} {name}{}\n",
            modifiers(&field)?,
            origin(&field)
        ));
    }
    for method in class.methods()? {
        let name = method.name()?.unwrap_or_default();
        let signature = match &method {
            Member::Own(own) => own_signature(own)?,
            Member::Light(synthetic) => synthetic
                .member
                .parameters()
                .iter()
                .map(|p| format!("{} {}", p.type_text, p.name))
                .collect::<Vec<_>>()
                .join(", "),
        };
        let returns = match method.type_text()? {
            Some(type_text) => format!("{type_text} "),
            None => String::new(),
        };
        out.push_str(&format!(
            "{indent}  method {}{returns}{name}({signature}){}\n",
            modifiers(&method)?,
            origin(&method)
        ));
    }
    for inner in class.inner_classes()? {
        match inner {
            Member::Own(inner) => describe_class(&inner, depth + 1, out)?,
            Member::Light(synthetic) => out.push_str(&format!(
                "{indent}  class {} [{}]\n",
                synthetic.member.name(),
                synthetic.member.origin()
            )),
        }
    }
    Ok(())
}

fn own_signature(method: &PsiMethod) -> PsiResult<String> {
    let parameters = method
        .parameters()?
        .iter()
        .map(|p| {
            Ok(format!(
                "{} {}",
                p.type_text()?.unwrap_or_default(),
                p.name()?.unwrap_or_default()
            ))
        })
        .collect::<PsiResult<Vec<_>>>()?;
    Ok(parameters.join(", "))
}

const MODIFIER_WORDS: [(StubFlags, &str); 7] = [
    (StubFlags::PUBLIC, "public"),
    (StubFlags::PROTECTED, "protected"),
    (StubFlags::PRIVATE, "private"),
    (StubFlags::ABSTRACT, "abstract"),
    (StubFlags::STATIC, "static"),
    (StubFlags::FINAL, "final"),
    (StubFlags::DEFAULT, "default"),
];

/// Explicit and implicit modifiers, each followed by a space.
fn modifiers(member: &impl ModifierOwner) -> PsiResult<String> {
    let flags = member.explicit_modifiers()? | member.implicit_modifiers()?;
    Ok(MODIFIER_WORDS
        .iter()
        .filter(|(flag, _)| flags.contains(*flag))
        .map(|(_, word)| format!("{word} "))
        .collect())
}

fn origin<T>(member: &Member<T>) -> String {
    match member.as_light() {
        Some(light) => format!(" [{}]", light.origin()),
        None => String::new(),
    }
}
