use super::descriptor::{FilterSet, NameMode, ScopeMode, TypeFilter};
use crate::facts::{TypeKind, TypeTrait};
use crate::naming::{MarkerRef, NamingScope, TypeIdent};

/// Fluent, accumulate-only builder for [`FilterSet`].
///
/// Descriptors can be added but never removed; `build` canonicalizes the
/// accumulated set. Construction never inspects module metadata.
#[derive(Debug, Default)]
pub struct FilterSetBuilder {
    filters: Vec<TypeFilter>,
}

impl FilterSetBuilder {
    pub fn assignable_to(mut self, target: TypeIdent) -> Self {
        self.filters.push(TypeFilter::AssignableTo(target));
        self
    }

    pub fn not_assignable_to(mut self, target: TypeIdent) -> Self {
        self.filters.push(TypeFilter::NotAssignableTo(target));
        self
    }

    pub fn assignable_to_any(mut self, targets: impl IntoIterator<Item = TypeIdent>) -> Self {
        self.filters
            .push(TypeFilter::AssignableToAny(targets.into_iter().collect()));
        self
    }

    pub fn not_assignable_to_any(mut self, targets: impl IntoIterator<Item = TypeIdent>) -> Self {
        self.filters
            .push(TypeFilter::NotAssignableToAny(targets.into_iter().collect()));
        self
    }

    pub fn name_matches(
        mut self,
        mode: NameMode,
        patterns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.filters.push(TypeFilter::NameMatches(
            mode,
            patterns.into_iter().map(Into::into).collect(),
        ));
        self
    }

    pub fn name_starts_with(self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.name_matches(NameMode::StartsWith, patterns)
    }

    pub fn name_ends_with(self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.name_matches(NameMode::EndsWith, patterns)
    }

    pub fn name_contains(self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.name_matches(NameMode::Contains, patterns)
    }

    pub fn in_scope(
        mut self,
        mode: ScopeMode,
        scopes: impl IntoIterator<Item = impl Into<NamingScope>>,
    ) -> Self {
        self.filters.push(TypeFilter::InNamingScope(
            mode,
            scopes.into_iter().map(Into::into).collect(),
        ));
        self
    }

    pub fn in_exact_scope(self, scopes: impl IntoIterator<Item = impl Into<NamingScope>>) -> Self {
        self.in_scope(ScopeMode::Exact, scopes)
    }

    pub fn under_scope(self, scopes: impl IntoIterator<Item = impl Into<NamingScope>>) -> Self {
        self.in_scope(ScopeMode::Prefix, scopes)
    }

    pub fn not_under_scope(self, scopes: impl IntoIterator<Item = impl Into<NamingScope>>) -> Self {
        self.in_scope(ScopeMode::NotPrefix, scopes)
    }

    pub fn has_marker(mut self, marker: impl Into<MarkerRef>) -> Self {
        self.filters.push(TypeFilter::HasMarker(marker.into()));
        self
    }

    pub fn lacks_marker(mut self, marker: impl Into<MarkerRef>) -> Self {
        self.filters.push(TypeFilter::LacksMarker(marker.into()));
        self
    }

    pub fn with_kinds(mut self, kinds: impl IntoIterator<Item = TypeKind>) -> Self {
        self.filters.push(TypeFilter::StructuralKind {
            include: true,
            kinds: kinds.into_iter().collect(),
        });
        self
    }

    pub fn without_kinds(mut self, kinds: impl IntoIterator<Item = TypeKind>) -> Self {
        self.filters.push(TypeFilter::StructuralKind {
            include: false,
            kinds: kinds.into_iter().collect(),
        });
        self
    }

    pub fn with_traits(mut self, traits: impl IntoIterator<Item = TypeTrait>) -> Self {
        self.filters.push(TypeFilter::StructuralInfo {
            include: true,
            traits: traits.into_iter().collect(),
        });
        self
    }

    pub fn without_traits(mut self, traits: impl IntoIterator<Item = TypeTrait>) -> Self {
        self.filters.push(TypeFilter::StructuralInfo {
            include: false,
            traits: traits.into_iter().collect(),
        });
        self
    }

    pub fn any_of(mut self, filters: impl IntoIterator<Item = TypeFilter>) -> Self {
        self.filters
            .push(TypeFilter::AnyOf(filters.into_iter().collect()));
        self
    }

    pub fn all_of(mut self, filters: impl IntoIterator<Item = TypeFilter>) -> Self {
        self.filters
            .push(TypeFilter::AllOf(filters.into_iter().collect()));
        self
    }

    pub fn not(mut self, filter: TypeFilter) -> Self {
        self.filters.push(TypeFilter::Not(Box::new(filter)));
        self
    }

    pub fn push(mut self, filter: TypeFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn build(self) -> FilterSet {
        FilterSet::from_filters(self.filters)
    }
}
