use std::sync::Arc;

use pretty_assertions::assert_eq;

use super::*;
use crate::{JavaFile, PsiConfig, PsiManager};

fn class_named(file: &Arc<JavaFile>, name: &str) -> PsiClass {
    file.classes()
        .unwrap()
        .into_iter()
        .find(|c| c.name().unwrap().as_deref() == Some(name))
        .unwrap()
}

fn qualified(classes: &[PsiClass]) -> Vec<String> {
    classes
        .iter()
        .map(|c| c.qualified_name().unwrap().unwrap_or_default())
        .collect()
}

#[test]
fn type_arguments_are_stripped() {
    assert_eq!(strip_type_arguments("Map<K, List<V>>"), "Map");
    assert_eq!(strip_type_arguments("a.Outer<T>.Inner"), "a.Outer.Inner");
    assert_eq!(strip_type_arguments("Plain"), "Plain");
}

#[test]
fn supers_across_files() {
    let manager = PsiManager::new(PsiConfig::default());
    let _base = manager.add_file("p/Base.java", "package p; public class Base {}");
    let _iface = manager.add_file("q/Shape.java", "package q; public interface Shape {}");
    let _util = manager.add_file("r/Util.java", "package r; public interface Named {}");
    let file = manager.add_file(
        "p/Circle.java",
        "package p;\nimport q.Shape;\nimport r.*;\nclass Circle extends Base implements Shape, Named, Missing {}",
    );
    let circle = class_named(&file, "Circle");
    assert_eq!(
        qualified(&direct_supers(&circle).unwrap()),
        vec!["p.Base", "q.Shape", "r.Named"]
    );
}

#[test]
fn member_classes_resolve_before_top_level_ones() {
    let file = PsiManager::new(PsiConfig::default()).add_file(
        "A.java",
        "class Node {}\nclass Tree { class Node {} class Leaf extends Node {} }",
    );
    let tree = class_named(&file, "Tree");
    let leaf = tree.find_inner_class_by_name("Leaf", false).unwrap().unwrap();
    let leaf = leaf.into_own().unwrap();
    assert_eq!(qualified(&leaf.supers().unwrap()), vec!["Tree.Node"]);
}

#[test]
fn qualified_references_descend_through_member_classes() {
    let manager = PsiManager::new(PsiConfig::default());
    let _outer = manager.add_file("a/Outer.java", "package a; class Outer { class Inner {} }");
    let file = manager.add_file(
        "b/User.java",
        "package b; import a.Outer;\nclass X extends Outer.Inner {}\nclass Y extends a.Outer.Inner {}",
    );
    let x = class_named(&file, "X");
    assert_eq!(qualified(&x.supers().unwrap()), vec!["a.Outer.Inner"]);
    let y = class_named(&file, "Y");
    assert_eq!(qualified(&y.supers().unwrap()), vec!["a.Outer.Inner"]);
}

#[test]
fn cyclic_hierarchies_terminate() {
    let file = PsiManager::new(PsiConfig::default()).add_file(
        "A.java",
        "class A extends B { int a; }\nclass B extends C {}\nclass C extends A { int c; }",
    );
    let a = class_named(&file, "A");
    assert_eq!(qualified(&all_supers(&a).unwrap()), vec!["B", "C"]);
    assert!(a.find_field_by_name("c", true).unwrap().is_some());
    assert!(a.find_field_by_name("z", true).unwrap().is_none());
}

#[test]
fn breadth_first_order() {
    let file = PsiManager::new(PsiConfig::default()).add_file(
        "A.java",
        "interface I {}\ninterface J extends I {}\nclass Base implements I {}\n\
         class D extends Base implements J {}",
    );
    let d = class_named(&file, "D");
    assert_eq!(qualified(&all_supers(&d).unwrap()), vec!["Base", "J", "I"]);
}
