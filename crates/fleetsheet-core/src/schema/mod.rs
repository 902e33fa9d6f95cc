pub mod builtin;

use crate::classify::ReferenceServiceSet;
use crate::config::Layout;
use crate::error::FleetsheetError;
use crate::extraction::SheetGrid;
use crate::locate::{value_at, value_below, value_right_of};
use crate::model::{CellRef, CellValue, Field, RowData};

/// Everything a resolver may read while filling one file's fields.
pub struct ResolveContext<'a> {
    pub grid: &'a SheetGrid,
    pub layout: &'a Layout,
    pub services: &'a ReferenceServiceSet,
}

/// Computes a field from the sheet and the fields resolved before it.
pub type DeriveFn = fn(&ResolveContext<'_>, &RowData) -> Option<CellValue>;

/// How a single output field gets its value.
#[derive(Clone)]
pub enum FieldResolver {
    /// Read one fixed cell.
    FixedCell(CellRef),
    /// Value in column D next to a column C label.
    LabelRight(String),
    /// Value one row below a label found at or after `scan_start_row`.
    LabelBelow { label: String, scan_start_row: u32 },
    /// Computed from other fields; `inputs` must be resolved first.
    Derived {
        inputs: Vec<Field>,
        derive: DeriveFn,
    },
    Constant(CellValue),
    /// Filled per vessel entry during row expansion.
    PerVessel,
    /// Reserved column, left blank.
    Internal,
}

impl FieldResolver {
    pub fn inputs(&self) -> &[Field] {
        match self {
            FieldResolver::Derived { inputs, .. } => inputs,
            _ => &[],
        }
    }

    pub fn resolve(&self, ctx: &ResolveContext<'_>, row: &RowData) -> Option<CellValue> {
        match self {
            FieldResolver::FixedCell(at) => value_at(ctx.grid, Some(*at)),
            FieldResolver::LabelRight(label) => value_right_of(ctx.grid, label),
            FieldResolver::LabelBelow {
                label,
                scan_start_row,
            } => value_below(ctx.grid, label, *scan_start_row),
            FieldResolver::Derived { derive, .. } => derive(ctx, row),
            FieldResolver::Constant(value) => Some(value.clone()),
            FieldResolver::PerVessel | FieldResolver::Internal => None,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            FieldResolver::FixedCell(_) => "fixed-cell",
            FieldResolver::LabelRight(_) => "label-right",
            FieldResolver::LabelBelow { .. } => "label-below",
            FieldResolver::Derived { .. } => "derived",
            FieldResolver::Constant(_) => "constant",
            FieldResolver::PerVessel => "per-vessel",
            FieldResolver::Internal => "internal",
        }
    }
}

impl std::fmt::Debug for FieldResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldResolver::FixedCell(at) => write!(f, "FixedCell({at})"),
            FieldResolver::LabelRight(label) => write!(f, "LabelRight({label:?})"),
            FieldResolver::LabelBelow {
                label,
                scan_start_row,
            } => write!(f, "LabelBelow({label:?}, row {scan_start_row})"),
            FieldResolver::Derived { inputs, .. } => write!(f, "Derived({inputs:?})"),
            other => f.write_str(other.kind()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub field: Field,
    pub resolver: FieldResolver,
}

impl FieldSpec {
    pub fn new(field: Field, resolver: FieldResolver) -> FieldSpec {
        FieldSpec { field, resolver }
    }
}

/// A validated set of field specs plus the order they must be resolved in.
#[derive(Debug, Clone)]
pub struct Schema {
    specs: Vec<FieldSpec>,
    order: Vec<usize>,
}

impl Schema {
    /// Every output field must have exactly one spec and derived inputs
    /// must not form a cycle.
    pub fn new(specs: Vec<FieldSpec>) -> Result<Schema, FleetsheetError> {
        for field in Field::ALL {
            let count = specs.iter().filter(|s| s.field == field).count();
            if count != 1 {
                return Err(FleetsheetError::Config(format!(
                    "field '{field}' has {count} specs, expected exactly one"
                )));
            }
        }
        let order = resolution_order(&specs)?;
        Ok(Schema { specs, order })
    }

    /// Specs in dependency order.
    pub fn ordered(&self) -> impl Iterator<Item = &FieldSpec> + '_ {
        self.order.iter().map(|&i| &self.specs[i])
    }

    pub fn spec(&self, field: Field) -> Option<&FieldSpec> {
        self.specs.iter().find(|s| s.field == field)
    }

    pub fn specs(&self) -> &[FieldSpec] {
        &self.specs
    }
}

/// Order specs so each derived field comes after all of its inputs.
///
/// Ties keep declaration order, so independent fields resolve in the order
/// they are listed.
pub fn resolution_order(specs: &[FieldSpec]) -> Result<Vec<usize>, FleetsheetError> {
    for spec in specs {
        for input in spec.resolver.inputs() {
            if !specs.iter().any(|s| s.field == *input) {
                return Err(FleetsheetError::Config(format!(
                    "field '{}' depends on '{}', which has no spec",
                    spec.field, input
                )));
            }
        }
    }

    let mut placed = vec![false; specs.len()];
    let mut order = Vec::with_capacity(specs.len());

    while order.len() < specs.len() {
        let ready = (0..specs.len()).find(|&i| {
            !placed[i]
                && specs[i].resolver.inputs().iter().all(|input| {
                    specs
                        .iter()
                        .enumerate()
                        .filter(|(_, s)| s.field == *input)
                        .all(|(j, _)| placed[j])
                })
        });

        match ready {
            Some(i) => {
                placed[i] = true;
                order.push(i);
            }
            None => {
                let stuck = (0..specs.len())
                    .find(|&i| !placed[i])
                    .map(|i| specs[i].field.to_string())
                    .unwrap_or_default();
                return Err(FleetsheetError::DependencyCycle(stuck));
            }
        }
    }

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derived(inputs: Vec<Field>) -> FieldResolver {
        FieldResolver::Derived {
            inputs,
            derive: |_, _| None,
        }
    }

    #[test]
    fn test_derived_fields_follow_inputs() {
        let specs = vec![
            FieldSpec::new(Field::MictServiceName, derived(vec![Field::ServiceName, Field::Port])),
            FieldSpec::new(Field::ServiceName, derived(vec![Field::ServiceDesc])),
            FieldSpec::new(Field::Port, derived(vec![])),
            FieldSpec::new(Field::ServiceDesc, FieldResolver::FixedCell("D3".parse().unwrap())),
        ];
        let order: Vec<Field> = resolution_order(&specs)
            .unwrap()
            .into_iter()
            .map(|i| specs[i].field)
            .collect();
        assert_eq!(
            order,
            vec![
                Field::Port,
                Field::ServiceDesc,
                Field::ServiceName,
                Field::MictServiceName
            ]
        );
    }

    #[test]
    fn test_cycle_detected() {
        let specs = vec![
            FieldSpec::new(Field::ServiceName, derived(vec![Field::LeadSl])),
            FieldSpec::new(Field::LeadSl, derived(vec![Field::ServiceName])),
        ];
        assert!(matches!(
            resolution_order(&specs),
            Err(FleetsheetError::DependencyCycle(_))
        ));
    }

    #[test]
    fn test_missing_input_rejected() {
        let specs = vec![FieldSpec::new(Field::VesselSize, derived(vec![Field::ShipsUsed]))];
        assert!(matches!(
            resolution_order(&specs),
            Err(FleetsheetError::Config(_))
        ));
    }

    #[test]
    fn test_schema_requires_every_field() {
        let specs = vec![FieldSpec::new(Field::Port, FieldResolver::Internal)];
        assert!(Schema::new(specs).is_err());
    }

    #[test]
    fn test_constant_and_internal_resolution() {
        let grid = SheetGrid::new();
        let layout = Layout::default();
        let services = ReferenceServiceSet::new();
        let ctx = ResolveContext {
            grid: &grid,
            layout: &layout,
            services: &services,
        };
        let row = RowData::new();
        assert_eq!(
            FieldResolver::Constant(CellValue::Int(1)).resolve(&ctx, &row),
            Some(CellValue::Int(1))
        );
        assert_eq!(FieldResolver::Internal.resolve(&ctx, &row), None);
        assert_eq!(FieldResolver::PerVessel.resolve(&ctx, &row), None);
    }
}
