//! Model fixtures shared by the rule tests.

use dispose_lint_core::model::{
    Argument, ConstantValue, MethodSymbol, Operation, Parameter, TypeSymbol,
};
use dispose_lint_core::{
    CancellationToken, CapabilityDescriptor, Compilation, Location, Rule, TypeContext, Violation,
    BOOLEAN_TYPE, DISPOSABLE_INTERFACE, GC_TYPE, OBJECT_TYPE,
};

pub const RESOURCE: &str = "Demo.Resource";
pub const DISPOSE: &str = "Demo.Resource.Dispose()";
pub const DISPOSE_BOOL: &str = "Demo.Resource.Dispose(bool)";
pub const FINALIZE: &str = "Demo.Resource.Finalize()";
pub const CAPABILITY_DISPOSE: &str = "System.IDisposable.Dispose()";
pub const SUPPRESS_FINALIZE: &str = "System.GC.SuppressFinalize(object)";

/// `System.Object`, `System.IDisposable`, `System.GC` and `System.Console`.
pub fn runtime() -> Vec<TypeSymbol> {
    vec![
        TypeSymbol::class(OBJECT_TYPE)
            .public()
            .with_method(MethodSymbol::finalizer("System.Object.Finalize()")),
        TypeSymbol::interface(DISPOSABLE_INTERFACE).public().with_method(
            MethodSymbol::new(CAPABILITY_DISPOSE, "Dispose")
                .public()
                .as_abstract(),
        ),
        TypeSymbol::class(GC_TYPE).public().sealed().with_method(
            MethodSymbol::new(SUPPRESS_FINALIZE, "SuppressFinalize")
                .public()
                .as_static()
                .with_parameter(Parameter::new("obj", OBJECT_TYPE)),
        ),
        TypeSymbol::class("System.Console").public().sealed().with_method(
            MethodSymbol::new("System.Console.WriteLine(string)", "WriteLine")
                .public()
                .as_static()
                .with_parameter(Parameter::new("value", "System.String")),
        ),
    ]
}

/// The runtime types plus `types`.
pub fn compile(types: Vec<TypeSymbol>) -> Compilation {
    let mut all = runtime();
    all.extend(types);
    Compilation::new("Demo", all).expect("valid compilation")
}

/// Runs `rule` on the type named `ty`.
pub fn check(rule: &dyn Rule, compilation: &Compilation, ty: &str) -> Vec<Violation> {
    let capability = CapabilityDescriptor::resolve(compilation).expect("capability present");
    let token = CancellationToken::new();
    let ty = compilation.find_type(ty).expect("type present");
    rule.check(&TypeContext::new(compilation, &capability, ty, &token))
}

/// `expression;`
pub fn statement(expression: Operation) -> Operation {
    Operation::expression_statement(expression)
}

/// `Dispose(disposing);` on `Demo.Resource`.
pub fn dispose_call(disposing: bool) -> Operation {
    statement(Operation::invocation(
        DISPOSE_BOOL,
        Some(Operation::this(RESOURCE)),
        vec![
            Argument::new(Operation::literal(ConstantValue::Bool(disposing)))
                .for_parameter("disposing"),
        ],
    ))
}

/// `GC.SuppressFinalize(this);` on `Demo.Resource`.
pub fn suppress_call() -> Operation {
    statement(Operation::invocation(
        SUPPRESS_FINALIZE,
        None,
        vec![Argument::new(Operation::conversion(
            Operation::this(RESOURCE),
            OBJECT_TYPE,
        ))],
    ))
}

/// `Console.WriteLine("bye");`
pub fn write_line() -> Operation {
    statement(Operation::invocation(
        "System.Console.WriteLine(string)",
        None,
        vec![Argument::new(Operation::literal(ConstantValue::String(
            "bye".into(),
        )))],
    ))
}

/// The compiler-generated trailing `return;`.
pub fn implicit_return() -> Operation {
    Operation::ret().implicit()
}

/// `public void Dispose() { body }`
pub fn dispose(body: Vec<Operation>) -> MethodSymbol {
    MethodSymbol::new(DISPOSE, "Dispose")
        .public()
        .with_body(Operation::block(body))
        .with_location(Location::new("src/Resource.cs", 12, 21))
}

/// `protected virtual void Dispose(bool disposing) { }`
pub fn dispose_bool() -> MethodSymbol {
    MethodSymbol::new(DISPOSE_BOOL, "Dispose")
        .protected()
        .as_virtual()
        .with_parameter(Parameter::new("disposing", BOOLEAN_TYPE))
        .with_body(Operation::block(vec![implicit_return()]))
        .with_location(Location::new("src/Resource.cs", 18, 24))
}

/// `~Resource() { body }`
pub fn finalizer(body: Operation) -> MethodSymbol {
    MethodSymbol::finalizer(FINALIZE)
        .overriding("System.Object.Finalize()")
        .with_body(body)
        .with_location(Location::new("src/Resource.cs", 8, 5))
}

/// `public class Resource : IDisposable` with a correct `Dispose()` and `Dispose(bool)`.
pub fn resource() -> TypeSymbol {
    TypeSymbol::class(RESOURCE)
        .public()
        .with_base(OBJECT_TYPE)
        .with_interface(DISPOSABLE_INTERFACE)
        .with_location(Location::new("src/Resource.cs", 5, 14))
        .with_method(dispose(vec![
            dispose_call(true),
            suppress_call(),
            implicit_return(),
        ]))
        .with_method(dispose_bool())
}
