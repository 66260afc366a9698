#![no_main]

use libfuzzer_sys::fuzz_target;
use sigscope::metadata::{
    signatures::{parse, parse_field_descriptor, parse_method_descriptor, ParsedSignature, SignatureKind},
    typesystem::{render, GenericDeclaration, ScopeChain, ScopeResolver},
};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let _ = parse_field_descriptor(text);
    let _ = parse_method_descriptor(text);

    let class = GenericDeclaration::Class("fuzz.Target".to_string());
    let method = GenericDeclaration::Method {
        class: "fuzz.Target".to_string(),
        name: "run".to_string(),
        descriptor: "()V".to_string(),
    };
    let scope = ScopeChain::new().with_inner(class, ["K", "V", "T", "E"]);

    for kind in [SignatureKind::Class, SignatureKind::Field, SignatureKind::Method] {
        match parse(text, kind) {
            Ok(ParsedSignature::Class(sig)) => {
                if let Ok(generics) = ScopeResolver::class_generics(&sig, "fuzz.Target", &scope) {
                    let _ = render(&generics.superclass);
                }
            }
            Ok(ParsedSignature::Method(sig)) => {
                if let Ok(generics) = ScopeResolver::method_generics(&sig, &method, &scope) {
                    let _ = render(&generics.return_type);
                }
            }
            Ok(ParsedSignature::Field(sig)) => {
                if let Ok(generics) = ScopeResolver::field_generics(&sig, &scope) {
                    let _ = render(&generics.field_type);
                }
            }
            Err(_) => {}
        }
    }
});
