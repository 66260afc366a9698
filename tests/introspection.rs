//! Reflective queries over an in-memory model of `java.util` collection classes.
//!
//! Every string asserted here is what the reflective Java API prints for the same
//! class file data.

use std::sync::Arc;

use sigscope::prelude::*;

const OBJECT: &str = "Ljava/lang/Object;";

const HASH_MAP_NESTED: [&str; 13] = [
    "TreeNode",
    "EntrySpliterator",
    "ValueSpliterator",
    "KeySpliterator",
    "HashMapSpliterator",
    "EntryIterator",
    "ValueIterator",
    "KeyIterator",
    "HashIterator",
    "EntrySet",
    "Values",
    "KeySet",
    "Node",
];

fn interface(name: &str) -> ClassDefinition {
    ClassDefinitionBuilder::new(name).interface().build().unwrap()
}

fn map_interface() -> ClassDefinition {
    ClassDefinitionBuilder::new("java/util/Map")
        .interface()
        .signature("<K:Ljava/lang/Object;V:Ljava/lang/Object;>Ljava/lang/Object;")
        .nested("java/util/Map$Entry")
        .build()
        .unwrap()
}

fn map_entry_interface() -> ClassDefinition {
    ClassDefinitionBuilder::new("java/util/Map$Entry")
        .interface()
        .flags(AccessFlags::PUBLIC | AccessFlags::STATIC | AccessFlags::INTERFACE | AccessFlags::ABSTRACT)
        .enclosing_class("java/util/Map")
        .signature("<K:Ljava/lang/Object;V:Ljava/lang/Object;>Ljava/lang/Object;")
        .method(
            MethodDefinition::new("getValue", "()Ljava/lang/Object;", AccessFlags::PUBLIC | AccessFlags::ABSTRACT)
                .with_signature("()TV;"),
        )
        .build()
        .unwrap()
}

fn abstract_map() -> ClassDefinition {
    ClassDefinitionBuilder::new("java/util/AbstractMap")
        .flags(AccessFlags::PUBLIC | AccessFlags::ABSTRACT)
        .signature(
            "<K:Ljava/lang/Object;V:Ljava/lang/Object;>Ljava/lang/Object;Ljava/util/Map<TK;TV;>;",
        )
        .implements("java/util/Map")
        .nested("java/util/AbstractMap$SimpleImmutableEntry")
        .nested("java/util/AbstractMap$SimpleEntry")
        .build()
        .unwrap()
}

fn simple_entry() -> ClassDefinition {
    ClassDefinitionBuilder::new("java/util/AbstractMap$SimpleEntry")
        .flags(AccessFlags::PUBLIC | AccessFlags::STATIC)
        .enclosing_class("java/util/AbstractMap")
        .signature(
            "<K:Ljava/lang/Object;V:Ljava/lang/Object;>Ljava/lang/Object;\
             Ljava/util/Map$Entry<TK;TV;>;Ljava/io/Serializable;",
        )
        .implements("java/util/Map$Entry")
        .implements("java/io/Serializable")
        .field(FieldDefinition::new(
            "serialVersionUID",
            "J",
            AccessFlags::PRIVATE | AccessFlags::STATIC | AccessFlags::FINAL,
        ))
        .field(
            FieldDefinition::new("key", OBJECT, AccessFlags::PRIVATE | AccessFlags::FINAL)
                .with_signature("TK;"),
        )
        .field(FieldDefinition::new("value", OBJECT, AccessFlags::PRIVATE).with_signature("TV;"))
        .method(
            MethodDefinition::new("<init>", "(Ljava/lang/Object;Ljava/lang/Object;)V", AccessFlags::PUBLIC)
                .with_signature("(TK;TV;)V"),
        )
        .method(
            MethodDefinition::new("<init>", "(Ljava/util/Map$Entry;)V", AccessFlags::PUBLIC)
                .with_signature("(Ljava/util/Map$Entry<+TK;+TV;>;)V"),
        )
        .method(
            MethodDefinition::new("getKey", "()Ljava/lang/Object;", AccessFlags::PUBLIC)
                .with_signature("()TK;"),
        )
        .method(
            MethodDefinition::new("getValue", "()Ljava/lang/Object;", AccessFlags::PUBLIC)
                .with_signature("()TV;"),
        )
        .method(
            MethodDefinition::new(
                "setValue",
                "(Ljava/lang/Object;)Ljava/lang/Object;",
                AccessFlags::PUBLIC,
            )
            .with_signature("(TV;)TV;"),
        )
        .method(MethodDefinition::new(
            "equals",
            "(Ljava/lang/Object;)Z",
            AccessFlags::PUBLIC,
        ))
        .build()
        .unwrap()
}

fn hash_map() -> ClassDefinition {
    let mut builder = ClassDefinitionBuilder::new("java/util/HashMap")
        .signature(
            "<K:Ljava/lang/Object;V:Ljava/lang/Object;>Ljava/util/AbstractMap<TK;TV;>;\
             Ljava/util/Map<TK;TV;>;Ljava/lang/Cloneable;Ljava/io/Serializable;",
        )
        .superclass("java/util/AbstractMap")
        .implements("java/util/Map")
        .implements("java/lang/Cloneable")
        .implements("java/io/Serializable")
        .field(
            FieldDefinition::new("table", "[Ljava/util/HashMap$Node;", AccessFlags::TRANSIENT)
                .with_signature("[Ljava/util/HashMap$Node<TK;TV;>;"),
        )
        .field(
            FieldDefinition::new("entrySet", "Ljava/util/Set;", AccessFlags::TRANSIENT)
                .with_signature("Ljava/util/Set<Ljava/util/Map$Entry<TK;TV;>;>;"),
        )
        .field(FieldDefinition::new("size", "I", AccessFlags::TRANSIENT))
        .method(
            MethodDefinition::new("keySet", "()Ljava/util/Set;", AccessFlags::PUBLIC)
                .with_signature("()Ljava/util/Set<TK;>;"),
        )
        .method(
            MethodDefinition::new("putAll", "(Ljava/util/Map;)V", AccessFlags::PUBLIC)
                .with_signature("(Ljava/util/Map<+TK;+TV;>;)V"),
        )
        .method(
            MethodDefinition::new(
                "writeObject",
                "(Ljava/io/ObjectOutputStream;)V",
                AccessFlags::PRIVATE,
            )
            .with_exceptions(["java/io/IOException"]),
        );

    for nested in HASH_MAP_NESTED {
        builder = builder.nested(&format!("java/util/HashMap${nested}"));
    }
    builder.build().unwrap()
}

fn hash_map_nested(name: &str) -> ClassDefinition {
    let binary = format!("java/util/HashMap${name}");
    let builder = ClassDefinitionBuilder::new(&binary)
        .flags(AccessFlags::FINAL)
        .enclosing_class("java/util/HashMap");

    let builder = match name {
        "Values" => builder
            .superclass("java/util/AbstractCollection")
            .signature("Ljava/util/AbstractCollection<TV;>;"),
        "KeySet" => builder
            .superclass("java/util/AbstractSet")
            .signature("Ljava/util/AbstractSet<TK;>;"),
        "TreeNode" => builder
            .flags(AccessFlags::STATIC | AccessFlags::FINAL)
            .superclass("java/util/LinkedHashMap$Entry")
            .signature(
                "<K:Ljava/lang/Object;V:Ljava/lang/Object;>Ljava/util/LinkedHashMap$Entry<TK;TV;>;",
            )
            .field(
                FieldDefinition::new("parent", "Ljava/util/HashMap$TreeNode;", AccessFlags::empty())
                    .with_signature("Ljava/util/HashMap$TreeNode<TK;TV;>;"),
            ),
        "Node" => builder
            .flags(AccessFlags::STATIC)
            .signature(
                "<K:Ljava/lang/Object;V:Ljava/lang/Object;>Ljava/lang/Object;Ljava/util/Map$Entry<TK;TV;>;",
            )
            .implements("java/util/Map$Entry"),
        _ => builder.flags(AccessFlags::ABSTRACT),
    };
    builder.build().unwrap()
}

fn arrays() -> ClassDefinition {
    ClassDefinitionBuilder::new("java/util/Arrays")
        .method(
            MethodDefinition::new(
                "asList",
                "([Ljava/lang/Object;)Ljava/util/List;",
                AccessFlags::PUBLIC | AccessFlags::STATIC | AccessFlags::VARARGS,
            )
            .with_signature("<T:Ljava/lang/Object;>([TT;)Ljava/util/List<TT;>;"),
        )
        .build()
        .unwrap()
}

fn collections() -> ClassDefinition {
    ClassDefinitionBuilder::new("java/util/Collections")
        .method(
            MethodDefinition::new(
                "max",
                "(Ljava/util/Collection;)Ljava/lang/Object;",
                AccessFlags::PUBLIC | AccessFlags::STATIC,
            )
            .with_signature(
                "<T:Ljava/lang/Object;:Ljava/lang/Comparable<-TT;>;>(Ljava/util/Collection<+TT;>;)TT;",
            ),
        )
        .method(
            MethodDefinition::new(
                "emptyList",
                "()Ljava/util/List;",
                AccessFlags::PUBLIC | AccessFlags::STATIC | AccessFlags::FINAL,
            )
            .with_signature("<T:Ljava/lang/Object;>()Ljava/util/List<TT;>;"),
        )
        .build()
        .unwrap()
}

fn java_util_source() -> MemoryClassSource {
    let source = MemoryClassSource::new();
    source.insert(ClassDefinitionBuilder::new("java/lang/Object").build().unwrap());
    source.insert(interface("java/lang/Cloneable"));
    source.insert(interface("java/io/Serializable"));
    source.insert(map_interface());
    source.insert(map_entry_interface());
    source.insert(abstract_map());
    source.insert(simple_entry());
    source.insert(hash_map());
    for nested in HASH_MAP_NESTED {
        source.insert(hash_map_nested(nested));
    }
    source.insert(arrays());
    source.insert(collections());
    source
}

fn java_util() -> ClassRegistry {
    ClassRegistry::new(Arc::new(java_util_source()))
}

#[test]
fn set_value_generic_parameter_types() {
    let registry = java_util();
    let entry = registry.get("java.util.AbstractMap$SimpleEntry").unwrap();
    let set_value = entry
        .declared_method("setValue", "(Ljava/lang/Object;)Ljava/lang/Object;")
        .unwrap();

    let params = set_value.generic_parameter_types(&registry).unwrap();
    assert_eq!(render_list(&params), "[V]");
    assert_eq!(set_value.generic_return_type(&registry).unwrap().to_string(), "V");
}

#[test]
fn abstract_map_generic_interfaces() {
    let registry = java_util();
    let abstract_map = registry.get("java.util.AbstractMap").unwrap();
    assert_eq!(
        render_list(abstract_map.generic_interfaces(&registry).unwrap()),
        "[java.util.Map<K, V>]"
    );
}

#[test]
fn hash_map_generic_interfaces() {
    let registry = java_util();
    let hash_map = registry.get("java.util.HashMap").unwrap();
    assert_eq!(
        render_list(hash_map.generic_interfaces(&registry).unwrap()),
        "[java.util.Map<K, V>, interface java.lang.Cloneable, interface java.io.Serializable]"
    );
}

#[test]
fn hash_map_declared_classes() {
    let registry = java_util();
    let hash_map = registry.get("java.util.HashMap").unwrap();
    let nested = hash_map.declared_nested_classes(&registry).unwrap();
    assert_eq!(
        render_list(nested.iter()),
        "[class java.util.HashMap$TreeNode, class java.util.HashMap$EntrySpliterator, \
         class java.util.HashMap$ValueSpliterator, class java.util.HashMap$KeySpliterator, \
         class java.util.HashMap$HashMapSpliterator, class java.util.HashMap$EntryIterator, \
         class java.util.HashMap$ValueIterator, class java.util.HashMap$KeyIterator, \
         class java.util.HashMap$HashIterator, class java.util.HashMap$EntrySet, \
         class java.util.HashMap$Values, class java.util.HashMap$KeySet, \
         class java.util.HashMap$Node]"
    );

    // repeated queries return the same order
    let again = hash_map.declared_nested_classes(&registry).unwrap();
    let names: Vec<_> = again.iter().map(|class| class.name().to_string()).collect();
    let first: Vec<_> = nested.iter().map(|class| class.name().to_string()).collect();
    assert_eq!(names, first);
}

#[test]
fn simple_entry_declared_fields() {
    let registry = java_util();
    let entry = registry.get("java.util.AbstractMap$SimpleEntry").unwrap();
    let fields = entry.declared_fields();
    assert_eq!(
        render_list(fields.iter()),
        "[private static final long java.util.AbstractMap$SimpleEntry.serialVersionUID, \
         private final java.lang.Object java.util.AbstractMap$SimpleEntry.key, \
         private java.lang.Object java.util.AbstractMap$SimpleEntry.value]"
    );
    assert_eq!(
        fields[2].to_generic_string(&registry).unwrap(),
        "private V java.util.AbstractMap$SimpleEntry.value"
    );
    // a field without a signature renders the same either way
    assert_eq!(
        fields[0].to_generic_string(&registry).unwrap(),
        fields[0].to_string()
    );
}

#[test]
fn values_superclass_resolves_in_enclosing_scope() {
    let registry = java_util();
    let hash_map = registry.get("java.util.HashMap").unwrap();
    let values = hash_map
        .declared_nested_classes(&registry)
        .unwrap()
        .into_iter()
        .find(|class| class.name() == "java.util.HashMap$Values")
        .unwrap();

    assert_eq!(values.to_string(), "class java.util.HashMap$Values");
    assert_eq!(
        values.generic_superclass(&registry).unwrap().as_deref(),
        Some("java.util.AbstractCollection<V>")
    );
    assert!(values.type_parameters(&registry).unwrap().is_empty());

    match values.generic_superclass_type(&registry).unwrap() {
        Some(TypeNode::Class(class)) => match &class.args[0] {
            TypeNode::Variable(variable) => assert_eq!(
                variable.declared_by,
                GenericDeclaration::Class("java.util.HashMap".to_string())
            ),
            other => panic!("unexpected argument {other:?}"),
        },
        other => panic!("unexpected superclass {other:?}"),
    }
}

#[test]
fn hash_map_generic_superclass() {
    let registry = java_util();
    let hash_map = registry.get("java.util.HashMap").unwrap();
    assert_eq!(
        hash_map.generic_superclass(&registry).unwrap().as_deref(),
        Some("java.util.AbstractMap<K, V>")
    );
}

#[test]
fn superclass_absent_for_object_and_interfaces() {
    let registry = java_util();
    let object = registry.get("java.lang.Object").unwrap();
    assert_eq!(object.generic_superclass(&registry).unwrap(), None);

    let map = registry.get("java.util.Map").unwrap();
    assert_eq!(map.generic_superclass(&registry).unwrap(), None);
    assert_eq!(map.to_string(), "interface java.util.Map");
}

#[test]
fn raw_superclass_has_class_prefix() {
    let registry = java_util();
    let entry = registry.get("java.util.AbstractMap$SimpleEntry").unwrap();
    assert_eq!(
        entry.generic_superclass(&registry).unwrap().as_deref(),
        Some("class java.lang.Object")
    );
}

#[test]
fn nested_class_type_parameters_shadow_enclosing() {
    let registry = java_util();
    let tree_node = registry.get("java.util.HashMap$TreeNode").unwrap();

    assert_eq!(
        tree_node.generic_superclass(&registry).unwrap().as_deref(),
        Some("java.util.LinkedHashMap$Entry<K, V>")
    );

    let parent = tree_node.declared_field("parent").unwrap();
    match parent.generic_type(&registry).unwrap() {
        TypeNode::Class(class) => {
            for arg in &class.args {
                match arg {
                    TypeNode::Variable(variable) => assert_eq!(
                        variable.declared_by,
                        GenericDeclaration::Class("java.util.HashMap$TreeNode".to_string())
                    ),
                    other => panic!("unexpected argument {other:?}"),
                }
            }
        }
        other => panic!("unexpected type {other:?}"),
    }
}

#[test]
fn hash_map_field_generic_strings() {
    let registry = java_util();
    let hash_map = registry.get("java.util.HashMap").unwrap();
    let rendered: Vec<_> = hash_map
        .declared_fields()
        .iter()
        .map(|field| field.to_generic_string(&registry).unwrap())
        .collect();
    assert_eq!(
        rendered,
        [
            "transient java.util.HashMap$Node<K, V>[] java.util.HashMap.table",
            "transient java.util.Set<java.util.Map$Entry<K, V>> java.util.HashMap.entrySet",
            "transient int java.util.HashMap.size",
        ]
    );
}

#[test]
fn method_strings() {
    let registry = java_util();
    let hash_map = registry.get("java.util.HashMap").unwrap();

    let key_set = hash_map.declared_method("keySet", "()Ljava/util/Set;").unwrap();
    assert_eq!(key_set.to_string(), "public java.util.Set java.util.HashMap.keySet()");
    assert_eq!(
        key_set.to_generic_string(&registry).unwrap(),
        "public java.util.Set<K> java.util.HashMap.keySet()"
    );

    let put_all = hash_map.declared_method("putAll", "(Ljava/util/Map;)V").unwrap();
    assert_eq!(
        put_all.to_generic_string(&registry).unwrap(),
        "public void java.util.HashMap.putAll(java.util.Map<? extends K, ? extends V>)"
    );

    let write_object = hash_map
        .declared_method("writeObject", "(Ljava/io/ObjectOutputStream;)V")
        .unwrap();
    assert_eq!(
        write_object.to_generic_string(&registry).unwrap(),
        "private void java.util.HashMap.writeObject(java.io.ObjectOutputStream) throws java.io.IOException"
    );
}

#[test]
fn generic_method_strings() {
    let registry = java_util();

    let arrays = registry.get("java.util.Arrays").unwrap();
    let as_list = &arrays.declared_methods()[0];
    assert!(as_list.is_varargs());
    assert_eq!(
        as_list.to_string(),
        "public static java.util.List java.util.Arrays.asList(java.lang.Object[])"
    );
    assert_eq!(
        as_list.to_generic_string(&registry).unwrap(),
        "public static <T> java.util.List<T> java.util.Arrays.asList(T...)"
    );

    let collections = registry.get("java.util.Collections").unwrap();
    let max = collections
        .declared_method("max", "(Ljava/util/Collection;)Ljava/lang/Object;")
        .unwrap();
    let type_parameters = max.type_parameters(&registry).unwrap();
    assert_eq!(type_parameters.len(), 1);
    assert_eq!(
        render_generic(&type_parameters[0]),
        "T extends java.lang.Object & java.lang.Comparable<? super T>"
    );
    assert_eq!(
        max.to_generic_string(&registry).unwrap(),
        "public static <T extends java.lang.Object & java.lang.Comparable<? super T>> T \
         java.util.Collections.max(java.util.Collection<? extends T>)"
    );
}

#[test]
fn method_type_parameter_shadows_class() {
    let source = java_util_source();
    source.insert(
        ClassDefinitionBuilder::new("test/Box")
            .signature("<T:Ljava/lang/Object;>Ljava/lang/Object;")
            .method(
                MethodDefinition::new("get", "()Ljava/lang/Object;", AccessFlags::PUBLIC)
                    .with_signature("()TT;"),
            )
            .method(
                MethodDefinition::new(
                    "convert",
                    "(Ljava/lang/Object;)Ljava/lang/Object;",
                    AccessFlags::PUBLIC,
                )
                .with_signature("<T:Ljava/lang/Object;>(TT;)TT;"),
            )
            .build()
            .unwrap(),
    );
    let registry = ClassRegistry::new(Arc::new(source));
    let class = registry.get("test.Box").unwrap();

    let get = &class.declared_methods()[0];
    let convert = &class.declared_methods()[1];

    let class_t = get.generic_return_type(&registry).unwrap();
    let method_t = convert.generic_return_type(&registry).unwrap();
    assert_eq!(class_t.to_string(), "T");
    assert_eq!(method_t.to_string(), "T");
    assert_ne!(class_t, method_t);
    match method_t {
        TypeNode::Variable(variable) => assert_eq!(variable.declared_by, convert.owner()),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn rendering_is_idempotent() {
    let registry = java_util();
    let hash_map = registry.get("java.util.HashMap").unwrap();
    let first = hash_map.generic_interfaces(&registry).unwrap();
    let second = hash_map.generic_interfaces(&registry).unwrap();
    assert_eq!(first, second);

    let view = hash_map.generics(&registry).unwrap();
    let again = hash_map.generics(&registry).unwrap();
    assert!(std::ptr::eq(view, again));
}

fn degraded_source() -> MemoryClassSource {
    let source = java_util_source();
    source.insert(
        ClassDefinitionBuilder::new("test/Broken")
            .signature("<V:Ljava/lang/Object;>Ljava/lang/Object;")
            .field(FieldDefinition::new("bad", OBJECT, AccessFlags::PRIVATE).with_signature("TV"))
            .field(FieldDefinition::new("good", OBJECT, AccessFlags::PRIVATE).with_signature("TV;"))
            .method(
                MethodDefinition::new(
                    "apply",
                    "(Ljava/lang/Object;)Ljava/lang/Object;",
                    AccessFlags::PUBLIC,
                )
                .with_signature("(TV;"),
            )
            .build()
            .unwrap(),
    );
    source
}

#[test]
fn malformed_signature_degrades_to_erased() {
    let registry = ClassRegistry::new(Arc::new(degraded_source()));
    let class = registry.get("test.Broken").unwrap();

    let bad = class.declared_field("bad").unwrap();
    assert!(bad.generics(&registry).unwrap().is_degraded());
    assert_eq!(
        bad.to_generic_string(&registry).unwrap(),
        "private java.lang.Object test.Broken.bad"
    );
    assert!(bad.cached_error().is_some_and(Error::is_syntax));

    // siblings are unaffected
    let good = class.declared_field("good").unwrap();
    assert_eq!(
        good.to_generic_string(&registry).unwrap(),
        "private V test.Broken.good"
    );

    let apply = class.declared_methods()[0].clone();
    assert_eq!(
        render_list(apply.generic_parameter_types(&registry).unwrap()),
        "[java.lang.Object]"
    );
    assert_eq!(
        apply.generics(&registry).unwrap().error(),
        Some(&Error::SignatureSyntax {
            offset: 4,
            expected: sigscope::Expected::Char(')'),
        })
    );
}

#[test]
fn strict_policy_surfaces_syntax_errors() {
    let registry = ClassRegistry::with_config(Arc::new(degraded_source()), ReflectionConfig::strict());
    let class = registry.get("test.Broken").unwrap();

    let bad = class.declared_field("bad").unwrap();
    assert!(matches!(
        bad.to_generic_string(&registry),
        Err(Error::SignatureSyntax { .. })
    ));
    // erased rendering never fails
    assert_eq!(bad.to_string(), "private java.lang.Object test.Broken.bad");

    let good = class.declared_field("good").unwrap();
    assert_eq!(
        good.to_generic_string(&registry).unwrap(),
        "private V test.Broken.good"
    );
}

#[test]
fn constructors_are_listed_apart_from_methods() {
    let registry = java_util();
    let entry = registry.get("java.util.AbstractMap$SimpleEntry").unwrap();

    assert!(entry
        .declared_methods()
        .iter()
        .all(|method| !method.is_constructor() && method.name() != "<clinit>"));

    let constructors = entry.declared_constructors();
    assert_eq!(constructors.len(), 2);
    assert_eq!(
        constructors[0].to_string(),
        "public java.util.AbstractMap$SimpleEntry(java.lang.Object,java.lang.Object)"
    );
    assert_eq!(
        constructors[0].to_generic_string(&registry).unwrap(),
        "public java.util.AbstractMap$SimpleEntry(K,V)"
    );
    assert_eq!(
        constructors[1].to_generic_string(&registry).unwrap(),
        "public java.util.AbstractMap$SimpleEntry(java.util.Map$Entry<? extends K, ? extends V>)"
    );
    assert!(entry.declared_constructor("(Ljava/util/Map$Entry;)V").is_some());
    assert!(entry.declared_constructor("()V").is_none());
}

fn malformed_class_source() -> MemoryClassSource {
    let source = java_util_source();
    source.insert(
        ClassDefinitionBuilder::new("test/Box")
            .signature("<T:Ljava/lang/Object;Ljava/lang/Object;")
            .field(FieldDefinition::new("item", OBJECT, AccessFlags::PRIVATE).with_signature("TT;"))
            .field(
                FieldDefinition::new("label", "Ljava/lang/String;", AccessFlags::PRIVATE)
                    .with_signature("Ljava/lang/String;"),
            )
            .method(
                MethodDefinition::new("get", "()Ljava/lang/Object;", AccessFlags::PUBLIC)
                    .with_signature("()TT;"),
            )
            .build()
            .unwrap(),
    );
    source
}

#[test]
fn members_of_malformed_class_degrade() {
    let registry = ClassRegistry::new(Arc::new(malformed_class_source()));
    let class = registry.get("test.Box").unwrap();
    assert!(class.generics(&registry).unwrap().is_degraded());

    let item = class.declared_field("item").unwrap();
    assert!(item.generics(&registry).unwrap().is_degraded());
    assert_eq!(
        item.to_generic_string(&registry).unwrap(),
        "private java.lang.Object test.Box.item"
    );

    let get = &class.declared_methods()[0];
    assert_eq!(
        get.to_generic_string(&registry).unwrap(),
        "public java.lang.Object test.Box.get()"
    );

    let label = class.declared_field("label").unwrap();
    assert!(label.generics(&registry).unwrap().generic().is_some());
    assert_eq!(
        label.to_generic_string(&registry).unwrap(),
        "private java.lang.String test.Box.label"
    );
}

#[test]
fn members_of_malformed_class_fail_strictly() {
    let registry =
        ClassRegistry::with_config(Arc::new(malformed_class_source()), ReflectionConfig::strict());
    let class = registry.get("test.Box").unwrap();

    let item = class.declared_field("item").unwrap();
    assert!(matches!(
        item.to_generic_string(&registry),
        Err(Error::SignatureSyntax { .. })
    ));
    assert!(matches!(
        class.declared_methods()[0].generic_return_type(&registry),
        Err(Error::SignatureSyntax { .. })
    ));
    assert_eq!(item.to_string(), "private java.lang.Object test.Box.item");
}

#[test]
fn rendering_does_not_materialize_classes() {
    let registry = java_util();
    registry.get("java.util.AbstractMap$SimpleEntry").unwrap();
    let loaded = registry.len();

    assert_eq!(
        registry.render_type(&TypeNode::raw("java.io.Serializable")),
        "interface java.io.Serializable"
    );
    assert!(registry.is_interface("java.util.Map$Entry"));
    assert_eq!(registry.len(), loaded);
    assert!(!registry.contains("java.io.Serializable"));
}

#[test]
fn erased_member_is_distinct_from_degraded() {
    let registry = java_util();
    let entry = registry.get("java.util.AbstractMap$SimpleEntry").unwrap();
    let serial = entry.declared_field("serialVersionUID").unwrap();
    let view = serial.generics(&registry).unwrap();
    assert!(view.is_erased());
    assert!(!view.is_degraded());
}

#[test]
fn unresolved_type_variable_is_an_error() {
    let source = java_util_source();
    source.insert(
        ClassDefinitionBuilder::new("test/Dangling")
            .signature("<T:Ljava/lang/Object;>Ljava/lang/Object;")
            .field(FieldDefinition::new("lost", OBJECT, AccessFlags::empty()).with_signature("TX;"))
            .field(FieldDefinition::new("kept", OBJECT, AccessFlags::empty()).with_signature("TT;"))
            .build()
            .unwrap(),
    );
    let registry = ClassRegistry::new(Arc::new(source));
    let class = registry.get("test.Dangling").unwrap();

    assert_eq!(
        class.declared_field("lost").unwrap().generic_type(&registry),
        Err(Error::UnresolvedTypeVariable {
            name: "X".to_string()
        })
    );
    assert_eq!(
        class
            .declared_field("kept")
            .unwrap()
            .generic_type(&registry)
            .unwrap()
            .to_string(),
        "T"
    );
}

#[test]
fn class_not_found_propagates() {
    let registry = java_util();
    assert_eq!(
        registry.get("java.util.TreeMap").unwrap_err(),
        Error::ClassNotFound("java.util.TreeMap".to_string())
    );
}

#[test]
fn eviction_drops_cached_views() {
    let registry = java_util();
    let before = registry.get("java.util.HashMap").unwrap();
    before.generics(&registry).unwrap();

    assert!(registry.evict("java.util.HashMap"));
    assert!(registry.get_loaded("java.util.HashMap").is_none());

    let after = registry.get("java.util.HashMap").unwrap();
    assert!(!Arc::ptr_eq(&before, &after));
    assert_eq!(
        after.generic_superclass(&registry).unwrap().as_deref(),
        Some("java.util.AbstractMap<K, V>")
    );
}

#[test]
fn concurrent_first_access_agrees() {
    let registry = Arc::new(java_util());

    let results: Vec<Vec<String>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                scope.spawn(move || {
                    let hash_map = registry.get("java.util.HashMap").unwrap();
                    let mut out = hash_map.generic_interfaces(&registry).unwrap();
                    for field in hash_map.declared_fields() {
                        out.push(field.to_generic_string(&registry).unwrap());
                    }
                    out
                })
            })
            .collect();
        handles.into_iter().map(|handle| handle.join().unwrap()).collect()
    });

    assert!(results.iter().all(|result| result == &results[0]));
    assert_eq!(registry.len(), registry.loaded_classes().len());
}

#[test]
fn preload_all_warms_every_class() {
    let registry = java_util();
    for name in java_util_source().names() {
        registry.get(&name).unwrap();
    }
    registry.preload_all().unwrap();

    let hash_map = registry.get_loaded("java.util.HashMap").unwrap();
    assert_eq!(
        hash_map.declared_fields()[0]
            .generics(&registry)
            .unwrap()
            .generic()
            .map(|generics| generics.field_type.to_string()),
        Some("java.util.HashMap$Node<K, V>[]".to_string())
    );
}
