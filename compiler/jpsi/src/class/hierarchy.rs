//! Supertype resolution.
//!
//! References are resolved by name only, without type arguments:
//!
//! 1. the enclosing classes and their member classes, innermost first
//! 2. top-level classes of the same file
//! 3. single-type imports
//! 4. classes of the same package
//! 5. on-demand imports
//!
//! A qualified reference resolves its first segment the same way and then
//! descends through member classes, falling back to a lookup of the whole
//! name as a qualified name.

use std::collections::VecDeque;

use jpsi_ir::ElementType;
use rustc_hash::FxHashSet;
use tracing::trace;

use crate::class::PsiClass;
use crate::error::PsiResult;
use crate::traits::Named;

/// `Map<K, List<V>>` becomes `Map`.
pub(crate) fn strip_type_arguments(reference: &str) -> String {
    let mut depth = 0usize;
    let mut out = String::with_capacity(reference.len());
    for c in reference.chars() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            c if depth == 0 && !c.is_whitespace() => out.push(c),
            _ => {}
        }
    }
    out
}

/// Resolved direct supertypes of `class`, in declaration order and without
/// duplicates. The body of an enum constant extends its enum.
pub(crate) fn direct_supers(class: &PsiClass) -> PsiResult<Vec<PsiClass>> {
    let mut references = class.extends_list()?;
    references.extend(class.implements_list()?);
    references.extend(class.base_class_reference()?);

    let mut supers: Vec<PsiClass> = Vec::new();
    if class.element().kind() == ElementType::EnumConstantInitializer {
        if let Some(owner) = class.element().containing_class()? {
            supers.push(owner);
        }
    }
    for reference in &references {
        match resolve_class_reference(class, reference)? {
            Some(resolved) if !supers.contains(&resolved) => supers.push(resolved),
            Some(_) => {}
            None => trace!(reference = %reference, "unresolved supertype"),
        }
    }
    Ok(supers)
}

/// Every resolvable supertype, breadth first, each once. `class` itself is
/// never included, even through a cyclic hierarchy.
pub(crate) fn all_supers(class: &PsiClass) -> PsiResult<Vec<PsiClass>> {
    let mut seen: FxHashSet<PsiClass> = FxHashSet::default();
    seen.insert(class.clone());
    let mut queue: VecDeque<PsiClass> = VecDeque::from([class.clone()]);
    let mut order = Vec::new();
    while let Some(current) = queue.pop_front() {
        for base in direct_supers(&current)? {
            if seen.insert(base.clone()) {
                order.push(base.clone());
                queue.push_back(base);
            } else {
                trace!(class = ?base.element(), "supertype already visited");
            }
        }
    }
    Ok(order)
}

/// Resolve `reference` as seen from the declaration of `from`.
pub(crate) fn resolve_class_reference(
    from: &PsiClass,
    reference: &str,
) -> PsiResult<Option<PsiClass>> {
    let name = strip_type_arguments(reference);
    let mut segments = name.split('.');
    let Some(first) = segments.next().filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    let rest: Vec<&str> = segments.collect();

    if let Some(mut resolved) = resolve_simple_name(from, first)? {
        let mut complete = true;
        for segment in &rest {
            match resolved
                .find_inner_class_by_name(segment, false)?
                .and_then(|m| m.into_own())
            {
                Some(inner) => resolved = inner,
                None => {
                    complete = false;
                    break;
                }
            }
        }
        if complete {
            return Ok(Some(resolved));
        }
    }
    if rest.is_empty() {
        return Ok(None);
    }
    from.element().manager().find_class(&name)
}

fn resolve_simple_name(from: &PsiClass, name: &str) -> PsiResult<Option<PsiClass>> {
    let mut scope = from.element().containing_class()?;
    while let Some(class) = scope {
        if class.name()?.as_deref() == Some(name) {
            return Ok(Some(class));
        }
        if let Some(inner) = class
            .find_inner_class_by_name(name, false)?
            .and_then(|m| m.into_own())
        {
            return Ok(Some(inner));
        }
        scope = class.element().containing_class()?;
    }

    let file = from.element().file();
    for class in file.classes()? {
        if class.name()?.as_deref() == Some(name) {
            return Ok(Some(class));
        }
    }

    let manager = from.element().manager();
    let imports = file.imports()?;
    for import in imports.iter().filter(|i| !i.is_static && !i.on_demand) {
        let simple = import.reference.rsplit('.').next();
        if simple == Some(name) {
            if let Some(found) = manager.find_class(&import.reference)? {
                return Ok(Some(found));
            }
        }
    }

    let in_package = match file.package_name()? {
        Some(package) => format!("{package}.{name}"),
        None => name.to_owned(),
    };
    if let Some(found) = manager.find_class(&in_package)? {
        return Ok(Some(found));
    }

    for import in imports.iter().filter(|i| !i.is_static && i.on_demand) {
        let package = import.reference.trim_end_matches(".*");
        if let Some(found) = manager.find_class(&format!("{package}.{name}"))? {
            return Ok(Some(found));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests;
