//! Resolution of module-selection expressions into ordered module lists.
//!
//! Generic over [`ProgramFacts`], so the identical logic serves the runtime
//! and static evaluators. Unresolvable references are skipped with a warning;
//! they contribute nothing.

use super::{ModuleId, ModuleSelection, ResolutionPolicy};
use crate::facts::{ModuleFacts, ProgramFacts};
use indexmap::IndexSet;
use tracing::warn;

/// Resolve a selection expression into a concrete ordered module list.
pub fn resolve_modules<'a, P: ProgramFacts>(
    program: &'a P,
    selection: &ModuleSelection,
    policy: ResolutionPolicy,
) -> Vec<&'a P::Module> {
    match selection {
        ModuleSelection::All => program
            .modules()
            .filter(|m| admitted(*m, policy))
            .collect(),
        ModuleSelection::This => match program.entry_module() {
            Some(id) => match program.module_by_id(id) {
                Some(module) if admitted(module, policy) => vec![module],
                Some(_) => Vec::new(),
                None => {
                    warn!(module = %id, "entry module is not resolvable");
                    Vec::new()
                }
            },
            None => Vec::new(),
        },
        ModuleSelection::Named(name) => match program.find_module(name) {
            Some(module) if admitted(module, policy) => vec![module],
            Some(_) => Vec::new(),
            None => {
                warn!(module = name, "named module not found; skipping");
                Vec::new()
            }
        },
        ModuleSelection::DependenciesOf(root) => {
            let mut seen = IndexSet::new();
            let mut out = Vec::new();
            visit(program, root, policy, &mut seen, &mut out);
            out
        }
    }
}

/// Post-order walk of the dependency graph: leaf dependencies are emitted
/// before their dependents, shared dependencies only once. System modules are
/// not emitted (unless opted in) but their dependencies are still traversed.
fn visit<'a, P: ProgramFacts>(
    program: &'a P,
    id: &ModuleId,
    policy: ResolutionPolicy,
    seen: &mut IndexSet<ModuleId>,
    out: &mut Vec<&'a P::Module>,
) {
    if !seen.insert(id.clone()) {
        return;
    }
    let Some(module) = program.module_by_id(id) else {
        warn!(module = %id, "dependency is not resolvable; skipping");
        return;
    };
    for dep in module.dependencies() {
        visit(program, dep, policy, seen, out);
    }
    if admitted(module, policy) {
        out.push(module);
    }
}

fn admitted<M: ModuleFacts>(module: &M, policy: ResolutionPolicy) -> bool {
    policy.include_system || !module.is_system()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::ModuleMarker;
    use crate::naming::{MarkerRef, TypeIdent};
    use crate::facts::{TypeFacts, TypeKind, TypeTrait};
    use std::collections::BTreeSet;

    struct NoType;

    impl TypeFacts for NoType {
        fn ident(&self) -> &TypeIdent {
            unreachable!()
        }
        fn kind(&self) -> TypeKind {
            unreachable!()
        }
        fn traits(&self) -> &BTreeSet<TypeTrait> {
            unreachable!()
        }
        fn assignable_idents(&self) -> &[TypeIdent] {
            unreachable!()
        }
        fn markers(&self) -> &[MarkerRef] {
            unreachable!()
        }
    }

    struct TestModule {
        id: ModuleId,
        system: bool,
        deps: Vec<ModuleId>,
    }

    impl TestModule {
        fn new(name: &str, deps: &[&str]) -> Self {
            Self {
                id: ModuleId::named(name),
                system: false,
                deps: deps.iter().map(|d| ModuleId::named(*d)).collect(),
            }
        }

        fn system(mut self) -> Self {
            self.system = true;
            self
        }
    }

    impl ModuleFacts for TestModule {
        type Type = NoType;

        fn id(&self) -> &ModuleId {
            &self.id
        }
        fn is_system(&self) -> bool {
            self.system
        }
        fn dependencies(&self) -> &[ModuleId] {
            &self.deps
        }
        fn markers(&self) -> &[ModuleMarker] {
            &[]
        }
        fn declared_types(&self) -> Box<dyn Iterator<Item = &NoType> + '_> {
            Box::new(std::iter::empty())
        }
    }

    struct TestProgram {
        modules: Vec<TestModule>,
        entry: Option<ModuleId>,
    }

    impl ProgramFacts for TestProgram {
        type Module = TestModule;

        fn modules(&self) -> Box<dyn Iterator<Item = &TestModule> + '_> {
            Box::new(self.modules.iter())
        }
        fn entry_module(&self) -> Option<&ModuleId> {
            self.entry.as_ref()
        }
    }

    fn names<M: ModuleFacts>(modules: &[&M]) -> Vec<String> {
        modules.iter().map(|m| m.id().name().to_string()).collect()
    }

    #[test]
    fn test_dependency_closure_is_leaf_first_and_deduped() {
        // M -> {B, C}, B -> {D}, C -> {D}; D shared, emitted once, before B.
        let program = TestProgram {
            modules: vec![
                TestModule::new("m", &["b", "c"]),
                TestModule::new("b", &["d"]),
                TestModule::new("c", &["d"]),
                TestModule::new("d", &[]),
            ],
            entry: None,
        };
        let resolved = resolve_modules(
            &program,
            &ModuleSelection::DependenciesOf(ModuleId::named("m")),
            ResolutionPolicy::default(),
        );
        assert_eq!(names(&resolved), vec!["d", "b", "c", "m"]);
    }

    #[test]
    fn test_system_modules_excluded_but_traversed() {
        // sys sits between m and leaf; leaf must still contribute.
        let program = TestProgram {
            modules: vec![
                TestModule::new("m", &["sys"]),
                TestModule::new("sys", &["leaf"]).system(),
                TestModule::new("leaf", &[]),
            ],
            entry: None,
        };
        let selection = ModuleSelection::DependenciesOf(ModuleId::named("m"));
        let resolved = resolve_modules(&program, &selection, ResolutionPolicy::default());
        assert_eq!(names(&resolved), vec!["leaf", "m"]);

        let with_system =
            resolve_modules(&program, &selection, ResolutionPolicy::with_system_modules());
        assert_eq!(names(&with_system), vec!["leaf", "sys", "m"]);
    }

    #[test]
    fn test_missing_dependency_is_skipped_not_fatal() {
        let program = TestProgram {
            modules: vec![TestModule::new("m", &["ghost"])],
            entry: None,
        };
        let resolved = resolve_modules(
            &program,
            &ModuleSelection::DependenciesOf(ModuleId::named("m")),
            ResolutionPolicy::default(),
        );
        assert_eq!(names(&resolved), vec!["m"]);
    }

    #[test]
    fn test_this_and_named_selection() {
        let program = TestProgram {
            modules: vec![TestModule::new("app", &[]), TestModule::new("lib", &[])],
            entry: Some(ModuleId::named("app")),
        };
        let this = resolve_modules(&program, &ModuleSelection::This, ResolutionPolicy::default());
        assert_eq!(names(&this), vec!["app"]);

        let named = resolve_modules(
            &program,
            &ModuleSelection::Named("lib".into()),
            ResolutionPolicy::default(),
        );
        assert_eq!(names(&named), vec!["lib"]);

        let missing = resolve_modules(
            &program,
            &ModuleSelection::Named("ghost".into()),
            ResolutionPolicy::default(),
        );
        assert!(missing.is_empty());
    }

    #[test]
    fn test_all_preserves_registration_order() {
        let program = TestProgram {
            modules: vec![
                TestModule::new("a", &[]),
                TestModule::new("sys", &[]).system(),
                TestModule::new("b", &[]),
            ],
            entry: None,
        };
        let resolved = resolve_modules(&program, &ModuleSelection::All, ResolutionPolicy::default());
        assert_eq!(names(&resolved), vec!["a", "b"]);
    }
}
