//! End-to-end composition: discovery from module markers, caller overrides,
//! and dispatch, plus the agreement between runtime discovery and a static
//! pre-resolution of the same program.

use accord_core::facts::ModuleFacts;
use accord_core::module::{resolve_modules, ModuleSelection, ResolutionPolicy};
use accord_core::naming::TypeIdent;
use accord_runtime::{
    Activator, CancelToken, ConventionContext, ConventionError, ConventionProvider,
    ConventionScanner, DiscoveryCache, UnitRegistration,
};
use integration_tests::{init_tracing, runtime_view, static_view, web_module_id};
use std::sync::Arc;

fn record(ctx: &mut ConventionContext, entry: String) {
    ctx.get_mut::<Vec<String>>("trace")
        .expect("trace property")
        .push(entry);
}

fn traced_context() -> ConventionContext {
    let mut ctx = ConventionContext::new();
    ctx.insert("trace", Vec::<String>::new());
    ctx
}

/// Activator producing a sync callable unit that records its own identity.
fn recording_activator() -> Activator {
    Arc::new(|ident: &TypeIdent| -> anyhow::Result<UnitRegistration> {
        let name = ident.qualified_name();
        Ok(UnitRegistration::callable(ident.clone(), move |ctx| {
            record(ctx, name.clone());
            Ok(())
        }))
    })
}

fn scanner(selection: ModuleSelection) -> ConventionScanner {
    ConventionScanner::new(
        runtime_view(),
        selection,
        recording_activator(),
        Arc::new(DiscoveryCache::new()),
    )
}

fn unit_idents(provider: &ConventionProvider) -> Vec<String> {
    provider
        .units()
        .iter()
        .map(|u| u.ident().qualified_name())
        .collect()
}

#[test]
fn test_discovery_follows_module_then_marker_order() {
    init_tracing();
    let mut scanner = scanner(ModuleSelection::All);
    let provider = scanner.build().unwrap();
    assert_eq!(
        unit_idents(&provider),
        vec![
            "app.core.LoggingConvention",
            "app.web.HttpConvention",
            "app.web.RoutingConvention",
        ]
    );
}

/// Static pre-resolution of the exported units must match what the runtime
/// scanner discovers from the same program: same module resolution, same
/// marker order.
#[test]
fn test_static_preresolution_matches_runtime_discovery() {
    init_tracing();
    let graph = static_view();
    let preresolved: Vec<TypeIdent> = resolve_modules(
        &graph,
        &ModuleSelection::DependenciesOf(web_module_id()),
        ResolutionPolicy::default(),
    )
    .into_iter()
    .flat_map(|m| m.exported_conventions())
    .collect();

    let mut scanner = scanner(ModuleSelection::DependenciesOf(web_module_id()));
    let provider = scanner.build().unwrap();
    let discovered: Vec<TypeIdent> = provider
        .units()
        .iter()
        .map(|u| u.ident().clone())
        .collect();

    assert_eq!(discovered, preresolved);
    assert_eq!(
        discovered,
        vec![
            TypeIdent::parse("app.core.LoggingConvention"),
            TypeIdent::parse("app.web.HttpConvention"),
            TypeIdent::parse("app.web.RoutingConvention"),
        ]
    );
}

#[test]
fn test_overrides_shape_the_final_sequence() {
    init_tracing();
    let mut scanner = scanner(ModuleSelection::All);
    scanner
        .prepend(UnitRegistration::callable(
            TypeIdent::parse("host.Bootstrap"),
            |ctx| {
                record(ctx, "host.Bootstrap".into());
                Ok(())
            },
        ))
        .unwrap();
    scanner
        .except_type(TypeIdent::parse("app.web.RoutingConvention"))
        .unwrap();
    scanner
        .append(UnitRegistration::callable(
            TypeIdent::parse("host.Finalize"),
            |ctx| {
                record(ctx, "host.Finalize".into());
                Ok(())
            },
        ))
        .unwrap();

    let provider = scanner.build().unwrap();
    assert_eq!(
        unit_idents(&provider),
        vec![
            "host.Bootstrap",
            "app.core.LoggingConvention",
            "app.web.HttpConvention",
            "host.Finalize",
        ]
    );

    // Discovered units carry their origin module; overrides carry none.
    assert_eq!(provider.units()[0].origin(), None);
    assert_eq!(provider.units()[2].origin(), Some(&web_module_id()));

    let mut ctx = traced_context();
    provider.apply(&mut ctx).unwrap();
    assert_eq!(
        ctx.get::<Vec<String>>("trace").unwrap(),
        &vec![
            "host.Bootstrap".to_string(),
            "app.core.LoggingConvention".to_string(),
            "app.web.HttpConvention".to_string(),
            "host.Finalize".to_string(),
        ]
    );
}

#[test]
fn test_sealed_scanner_keeps_serving_the_built_provider() {
    init_tracing();
    let mut scanner = scanner(ModuleSelection::All);
    let first = scanner.build().unwrap();
    scanner.seal();

    let err = scanner
        .except_type(TypeIdent::parse("app.web.HttpConvention"))
        .unwrap_err();
    assert!(matches!(err, ConventionError::Sealed));

    let second = scanner.build().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

/// Mixed sync/async discovery dispatched asynchronously: every discovered
/// unit runs, in discovery order, with the token threaded through.
#[tokio::test]
async fn test_async_dispatch_of_discovered_units() {
    init_tracing();
    let activator: Activator =
        Arc::new(|ident: &TypeIdent| -> anyhow::Result<UnitRegistration> {
            let name = ident.qualified_name();
            // Web units are constructed as async callables, the rest as sync.
            if ident.scope().as_str() == "app.web" {
                Ok(UnitRegistration::callable_async(
                    ident.clone(),
                    Arc::new(move |ctx, _cancel| {
                        let name = name.clone();
                        Box::pin(async move {
                            record(ctx, name);
                            Ok(())
                        })
                    }),
                ))
            } else {
                Ok(UnitRegistration::callable(ident.clone(), move |ctx| {
                    record(ctx, name.clone());
                    Ok(())
                }))
            }
        });
    let mut scanner = ConventionScanner::new(
        runtime_view(),
        ModuleSelection::All,
        activator,
        Arc::new(DiscoveryCache::new()),
    );
    let provider = scanner.build().unwrap();

    let mut ctx = traced_context();
    provider
        .apply_async(&mut ctx, CancelToken::new())
        .await
        .unwrap();
    assert_eq!(
        ctx.get::<Vec<String>>("trace").unwrap(),
        &vec![
            "app.core.LoggingConvention".to_string(),
            "app.web.HttpConvention".to_string(),
            "app.web.RoutingConvention".to_string(),
        ]
    );
}

/// Cancelling between units aborts the remaining discovered sequence and
/// names the unit that was about to run.
#[tokio::test]
async fn test_cancellation_mid_discovered_sequence() {
    init_tracing();
    let cancel = CancelToken::new();
    let trigger = cancel.clone();
    let activator: Activator =
        Arc::new(move |ident: &TypeIdent| -> anyhow::Result<UnitRegistration> {
            let name = ident.qualified_name();
            let trigger = trigger.clone();
            Ok(UnitRegistration::callable(ident.clone(), move |ctx| {
                record(ctx, name.clone());
                if name == "app.core.LoggingConvention" {
                    trigger.cancel();
                }
                Ok(())
            }))
        });
    let mut scanner = ConventionScanner::new(
        runtime_view(),
        ModuleSelection::All,
        activator,
        Arc::new(DiscoveryCache::new()),
    );
    let provider = scanner.build().unwrap();

    let mut ctx = traced_context();
    let err = provider.apply_async(&mut ctx, cancel).await.unwrap_err();
    assert!(matches!(err, ConventionError::Cancelled { ref ident }
        if ident == &TypeIdent::parse("app.web.HttpConvention")));
    assert_eq!(
        ctx.get::<Vec<String>>("trace").unwrap(),
        &vec!["app.core.LoggingConvention".to_string()]
    );
}
