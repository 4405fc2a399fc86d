use super::{is_nested_source, EdgeFact, MetricDriver};
use crate::analysis::context::RunContext;
use crate::core::{CouplingKind, Resolution};
use crate::facts::{CompiledModule, DeclaredEntity, SourceEntity, TypeRef};
use crate::namespace::{is_lambda_owner, LAMBDA};

/// One edge per invocation site.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallCoupling;

impl MetricDriver for CallCoupling {
    fn kind(&self) -> CouplingKind {
        CouplingKind::Call
    }

    fn emit(&self, entity: &DeclaredEntity<'_>, context: &RunContext, out: &mut Vec<EdgeFact>) {
        if is_nested_source(entity) {
            return;
        }
        match entity {
            DeclaredEntity::Compiled {
                module,
                qualified_name,
            } => emit_compiled(module, qualified_name, context, out),
            DeclaredEntity::Source(source) => emit_source(source, context, out),
        }
    }
}

fn emit_compiled(
    module: &CompiledModule,
    from: &str,
    context: &RunContext,
    out: &mut Vec<EdgeFact>,
) {
    for invocation in module.invocations.iter().filter(|i| !i.is_initializer()) {
        let owner = invocation.owner.trim().replace('/', ".");
        out.push(call_fact(from, &owner, &invocation.method, context));
    }
}

fn emit_source(source: &SourceEntity<'_>, context: &RunContext, out: &mut Vec<EdgeFact>) {
    let from = source.qualified_name;
    for call in &source.declaration.calls {
        let fact = match &call.target {
            TypeRef::Resolved(owner) => call_fact(from, owner.trim(), &call.method, context),
            TypeRef::Unresolved { name, reason } => {
                let position = call
                    .line
                    .map(|line| format!(" at line {line}"))
                    .unwrap_or_default();
                EdgeFact::new(
                    from,
                    name.as_str(),
                    Resolution::error(format!(
                        "cannot resolve call to '{}'{}: {}",
                        call.method, position, reason
                    )),
                )
            }
            TypeRef::Primitive(name) => EdgeFact::new(
                from,
                name.as_str(),
                Resolution::error(format!(
                    "call to '{}' has primitive receiver type",
                    call.method
                )),
            ),
        };
        out.push(fact);
    }
}

fn call_fact(from: &str, owner: &str, method: &str, context: &RunContext) -> EdgeFact {
    if is_lambda_owner(owner) {
        return EdgeFact::new(from, LAMBDA, Resolution::NotProjectPart);
    }
    if context.ignore.is_ignored(owner, method, &context.namespace) {
        return EdgeFact::new(from, owner, Resolution::Ignored);
    }
    let resolution = if context.namespace.is_registered(owner) {
        Resolution::Resolved
    } else {
        Resolution::NotProjectPart
    };
    EdgeFact::new(from, owner, resolution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::{CallSite, Invocation, Opcode, SourceDeclaration, SourceUnit};
    use crate::metrics::test_support::project_context;

    fn invocation(opcode: Opcode, owner: &str, method: &str) -> Invocation {
        Invocation {
            opcode,
            owner: owner.into(),
            method: method.into(),
        }
    }

    fn emit_for_module(module: &CompiledModule) -> Vec<EdgeFact> {
        let context = project_context();
        let name = module.qualified_name();
        let mut out = Vec::new();
        CallCoupling.emit(
            &DeclaredEntity::Compiled {
                module,
                qualified_name: &name,
            },
            &context,
            &mut out,
        );
        out
    }

    #[test]
    fn test_compiled_calls() {
        let mut module = CompiledModule::new("a/b/ClassA");
        module.invocations = vec![
            invocation(Opcode::InvokeVirtual, "a/b/ClassB", "run"),
            invocation(Opcode::InvokeStatic, "java/lang/Math", "max"),
        ];

        let facts = emit_for_module(&module);
        assert_eq!(
            facts,
            vec![
                EdgeFact::new("a.b.ClassA", "a.b.ClassB", Resolution::Resolved),
                EdgeFact::new("a.b.ClassA", "java.lang.Math", Resolution::NotProjectPart),
            ]
        );
    }

    #[test]
    fn test_initializers_are_not_emitted() {
        let mut module = CompiledModule::new("a/b/ClassA");
        module.invocations = vec![
            invocation(Opcode::InvokeSpecial, "a/b/ClassB", "<init>"),
            invocation(Opcode::InvokeStatic, "a/b/ClassB", "<clinit>"),
        ];
        assert!(emit_for_module(&module).is_empty());
    }

    #[test]
    fn test_lambda_owner_maps_to_sentinel() {
        let mut module = CompiledModule::new("a/b/ClassA");
        module.invocations = vec![invocation(Opcode::InvokeDynamic, "lambda$run$0", "apply")];
        assert_eq!(
            emit_for_module(&module),
            vec![EdgeFact::new("a.b.ClassA", LAMBDA, Resolution::NotProjectPart)]
        );
    }

    #[test]
    fn test_ignore_list_marks_runtime_helpers() {
        let mut module = CompiledModule::new("a/b/ClassA");
        module.invocations = vec![invocation(
            Opcode::InvokeVirtual,
            "java/lang/StringBuilder",
            "append",
        )];
        assert_eq!(
            emit_for_module(&module),
            vec![EdgeFact::new(
                "a.b.ClassA",
                "java.lang.StringBuilder",
                Resolution::Ignored
            )]
        );
    }

    #[test]
    fn test_source_calls_and_errors() {
        let context = project_context();
        let unit = SourceUnit {
            package: Some("a.b".into()),
            ..Default::default()
        };
        let declaration = SourceDeclaration {
            name: "ClassA".into(),
            calls: vec![
                CallSite {
                    method: "run".into(),
                    target: TypeRef::resolved("a.c.ClassC"),
                    line: None,
                },
                CallSite {
                    method: "frob".into(),
                    target: TypeRef::unresolved("helper", "symbol not found"),
                    line: Some(7),
                },
            ],
            ..Default::default()
        };
        let mut out = Vec::new();
        CallCoupling.emit(
            &DeclaredEntity::Source(SourceEntity {
                unit: &unit,
                declaration: &declaration,
                qualified_name: "a.b.ClassA",
            }),
            &context,
            &mut out,
        );

        assert_eq!(out.len(), 2);
        assert_eq!(
            out[0],
            EdgeFact::new("a.b.ClassA", "a.c.ClassC", Resolution::Resolved)
        );
        assert_eq!(
            out[1].resolution,
            Resolution::error("cannot resolve call to 'frob' at line 7: symbol not found")
        );
    }

    #[test]
    fn test_nested_source_declarations_are_skipped() {
        let context = project_context();
        let unit = SourceUnit::default();
        let declaration = SourceDeclaration {
            name: "Inner".into(),
            outer: Some("ClassA".into()),
            calls: vec![CallSite {
                method: "run".into(),
                target: TypeRef::resolved("a.b.ClassB"),
                line: None,
            }],
            ..Default::default()
        };
        let mut out = Vec::new();
        CallCoupling.emit(
            &DeclaredEntity::Source(SourceEntity {
                unit: &unit,
                declaration: &declaration,
                qualified_name: "ClassA$Inner",
            }),
            &context,
            &mut out,
        );
        assert!(out.is_empty());
    }
}
