//! Shared fixtures: one program described twice, as loaded metadata and as a
//! static symbol graph. The cross-evaluator tests assert that every query
//! selects the same ordered type identities from both views.

use accord_analysis::{ModuleSymbol, ScopeSymbol, SymbolGraph, TypeSymbol};
use accord_core::facts::{TypeKind, TypeTrait};
use accord_core::module::{ModuleId, ModuleMarker};
use accord_core::naming::{marker_base, TypeIdent};
use accord_runtime::{LoadedModules, ModuleMetadata, TypeMetadata};

pub fn core_module_id() -> ModuleId {
    ModuleId::new("app.core", "pk-core")
}

pub fn web_module_id() -> ModuleId {
    ModuleId::new("app.web", "pk-web")
}

pub fn sys_module_id() -> ModuleId {
    ModuleId::new("sys.runtime", "pk-sys")
}

fn convention_ident() -> TypeIdent {
    TypeIdent::parse("app.core.Convention")
}

fn export_marker_ident() -> TypeIdent {
    TypeIdent::parse("app.core.ExportMarker")
}

/// The program as the runtime evaluator sees it: loaded module metadata,
/// including one module that failed to load.
pub fn runtime_view() -> LoadedModules {
    let mut modules = LoadedModules::new();

    modules.register(
        ModuleMetadata::new(core_module_id())
            .with_marker(ModuleMarker::exports(TypeIdent::parse(
                "app.core.LoggingConvention",
            )))
            .with_type(
                TypeMetadata::new(convention_ident(), TypeKind::Interface)
                    .with_trait(TypeTrait::Abstract)
                    .with_trait(TypeTrait::PubliclyVisible),
            )
            .with_type(
                TypeMetadata::new(
                    TypeIdent::parse("app.core.LoggingConvention"),
                    TypeKind::Class,
                )
                .with_base(convention_ident())
                .with_trait(TypeTrait::Sealed)
                .with_trait(TypeTrait::PubliclyVisible),
            )
            .with_type(
                TypeMetadata::new(export_marker_ident(), TypeKind::Class)
                    .with_base(marker_base()),
            ),
    );

    modules.register(
        ModuleMetadata::new(web_module_id())
            .with_dependency(core_module_id())
            .with_marker(ModuleMarker::exports_all([
                TypeIdent::parse("app.web.HttpConvention"),
                TypeIdent::parse("app.web.RoutingConvention"),
            ]))
            .with_type(
                TypeMetadata::new(TypeIdent::parse("app.web.HttpConvention"), TypeKind::Class)
                    .with_base(convention_ident())
                    .with_marker(export_marker_ident())
                    .with_trait(TypeTrait::PubliclyVisible),
            )
            .with_type(
                TypeMetadata::new(
                    TypeIdent::parse("app.web.RoutingConvention"),
                    TypeKind::Class,
                )
                .with_base(convention_ident())
                .with_trait(TypeTrait::Generic)
                .with_trait(TypeTrait::PubliclyVisible),
            )
            .with_type(
                TypeMetadata::new(TypeIdent::parse("app.web.Settings"), TypeKind::Struct)
                    .with_trait(TypeTrait::ValueType)
                    .with_trait(TypeTrait::PubliclyVisible)
                    .with_nested(TypeMetadata::new(
                        TypeIdent::parse("app.web.Settings.Inner"),
                        TypeKind::Class,
                    )),
            )
            .with_type(TypeMetadata::new(
                TypeIdent::parse("app.web.<Route>Closure"),
                TypeKind::Class,
            )),
    );

    modules.register(
        ModuleMetadata::new(sys_module_id()).system().with_type(
            TypeMetadata::new(TypeIdent::parse("sys.SysConvention"), TypeKind::Class)
                .with_base(convention_ident()),
        ),
    );

    modules.register_unresolved(ModuleId::named("ghost"), "missing native dependency");
    modules.set_entry(web_module_id());
    modules
}

/// The same program as the static evaluator sees it: a symbol graph. The
/// export marker on `HttpConvention` is carried by qualified name only, as
/// when the marker's module is not resolvable at analysis time.
pub fn static_view() -> SymbolGraph {
    SymbolGraph::new()
        .with_module(
            ModuleSymbol::new(core_module_id())
                .with_marker(ModuleMarker::exports(TypeIdent::parse(
                    "app.core.LoggingConvention",
                )))
                .with_scope(
                    ScopeSymbol::new("app.core")
                        .with_type(
                            TypeSymbol::new(convention_ident(), TypeKind::Interface)
                                .with_trait(TypeTrait::Abstract)
                                .with_trait(TypeTrait::PubliclyVisible),
                        )
                        .with_type(
                            TypeSymbol::new(
                                TypeIdent::parse("app.core.LoggingConvention"),
                                TypeKind::Class,
                            )
                            .with_base(convention_ident())
                            .with_trait(TypeTrait::Sealed)
                            .with_trait(TypeTrait::PubliclyVisible),
                        )
                        .with_type(
                            TypeSymbol::new(export_marker_ident(), TypeKind::Class)
                                .with_base(marker_base()),
                        ),
                ),
        )
        .with_module(
            ModuleSymbol::new(web_module_id())
                .with_dependency(core_module_id())
                .with_marker(ModuleMarker::exports_all([
                    TypeIdent::parse("app.web.HttpConvention"),
                    TypeIdent::parse("app.web.RoutingConvention"),
                ]))
                .with_scope(
                    ScopeSymbol::new("app.web")
                        .with_type(
                            TypeSymbol::new(
                                TypeIdent::parse("app.web.HttpConvention"),
                                TypeKind::Class,
                            )
                            .with_base(convention_ident())
                            .with_named_marker("app.core.ExportMarker")
                            .with_trait(TypeTrait::PubliclyVisible),
                        )
                        .with_type(
                            TypeSymbol::new(
                                TypeIdent::parse("app.web.RoutingConvention"),
                                TypeKind::Class,
                            )
                            .with_base(convention_ident())
                            .with_trait(TypeTrait::Generic)
                            .with_trait(TypeTrait::PubliclyVisible),
                        )
                        .with_type(
                            TypeSymbol::new(TypeIdent::parse("app.web.Settings"), TypeKind::Struct)
                                .with_trait(TypeTrait::ValueType)
                                .with_trait(TypeTrait::PubliclyVisible)
                                .with_nested(TypeSymbol::new(
                                    TypeIdent::parse("app.web.Settings.Inner"),
                                    TypeKind::Class,
                                )),
                        )
                        .with_type(TypeSymbol::new(
                            TypeIdent::parse("app.web.<Route>Closure"),
                            TypeKind::Class,
                        )),
                ),
        )
        .with_module(
            ModuleSymbol::new(sys_module_id()).system().with_scope(
                ScopeSymbol::new("sys").with_type(
                    TypeSymbol::new(TypeIdent::parse("sys.SysConvention"), TypeKind::Class)
                        .with_base(convention_ident()),
                ),
            ),
        )
        .with_entry(web_module_id())
}

/// Install the test tracing subscriber (idempotent).
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
