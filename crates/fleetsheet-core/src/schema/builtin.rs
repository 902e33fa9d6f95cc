//! Field schema of the recurring service report.

use tracing::debug;

use crate::classify::service::mentions_mict;
use crate::classify::{classify_port, format_participants, reconcile_service_name, MANUAL_CHECK};
use crate::config::Layout;
use crate::error::FleetsheetError;
use crate::locate::value_below;
use crate::model::{column_index, CellValue, Field, RowData};
use crate::parsing::ships::NO_SIZE;
use crate::parsing::{between_phrases, leading_sl_before_dash, service_name, vessel_size_and_count};
use crate::schema::{DeriveFn, FieldResolver, FieldSpec, ResolveContext, Schema};

pub const COMMENTS_LABEL: &str = "Comments";
pub const COVERAGE_LABEL: &str = "Coverage";
pub const SAILING_FREQUENCY_LABEL: &str = "Sailing frequency";
pub const WEEKLY_CAPACITY_LABEL: &str = "Weekly capacity (teu)";
pub const PROFORMA_FLEET_LABEL: &str = "Proforma fleet";
pub const PORT_ROTATION_LABEL: &str = "Port rotation";

/// Build the service report schema for `layout`.
pub fn service_report_schema(layout: &Layout) -> Result<Schema, FleetsheetError> {
    use FieldResolver::*;

    let derived = |inputs: &[Field], derive: DeriveFn| Derived {
        inputs: inputs.to_vec(),
        derive,
    };

    Schema::new(vec![
        FieldSpec::new(Field::Port, derived(&[], port_from_comments)),
        FieldSpec::new(
            Field::MictServiceName,
            derived(&[Field::ServiceName, Field::Port], mict_service_name),
        ),
        FieldSpec::new(
            Field::ServiceName,
            derived(&[Field::ServiceDesc], service_name_from_desc),
        ),
        FieldSpec::new(Field::ServiceDesc, FixedCell(layout.service_desc_ref()?)),
        FieldSpec::new(Field::Route, LabelRight(COVERAGE_LABEL.into())),
        FieldSpec::new(Field::LeadSl, derived(&[Field::ServiceDesc], lead_sl_from_desc)),
        FieldSpec::new(Field::SailingFreq, LabelRight(SAILING_FREQUENCY_LABEL.into())),
        FieldSpec::new(Field::Participants, derived(&[], participants)),
        FieldSpec::new(Field::VesselOperator, PerVessel),
        FieldSpec::new(
            Field::VesselCount,
            derived(&[Field::ShipsUsed], vessel_count_from_fleet),
        ),
        // One per row so that summing the column counts vessels.
        FieldSpec::new(Field::VesselsPerRowCount, Constant(CellValue::Int(1))),
        FieldSpec::new(Field::WeeklyCapacity, LabelRight(WEEKLY_CAPACITY_LABEL.into())),
        FieldSpec::new(Field::ShipsUsed, LabelRight(PROFORMA_FLEET_LABEL.into())),
        FieldSpec::new(Field::AltServiceCode, Internal),
        FieldSpec::new(
            Field::PortRotation,
            LabelBelow {
                label: PORT_ROTATION_LABEL.into(),
                scan_start_row: layout.port_rotation_scan_row,
            },
        ),
        FieldSpec::new(
            Field::VesselSize,
            derived(&[Field::ShipsUsed], vessel_size_from_fleet),
        ),
        FieldSpec::new(Field::VesselName, PerVessel),
    ])
}

fn port_from_comments(ctx: &ResolveContext<'_>, _row: &RowData) -> Option<CellValue> {
    let comments = value_below(ctx.grid, COMMENTS_LABEL, ctx.layout.comments_scan_row)
        .map(|v| v.to_text())
        .unwrap_or_default();
    if comments.is_empty() {
        debug!("no comments block, port defaults from empty text");
    }
    let window = between_phrases(
        &comments,
        &ctx.layout.comments_start_phrase,
        &ctx.layout.comments_end_phrase,
    );
    Some(CellValue::text(classify_port(window).as_str()))
}

fn service_name_from_desc(_ctx: &ResolveContext<'_>, row: &RowData) -> Option<CellValue> {
    let desc = row.text(Field::ServiceDesc)?;
    Some(CellValue::Text(service_name(&desc)))
}

fn mict_service_name(ctx: &ResolveContext<'_>, row: &RowData) -> Option<CellValue> {
    let port = row.text(Field::Port).unwrap_or_default();
    match row.text(Field::ServiceName) {
        Some(name) => Some(CellValue::Text(reconcile_service_name(
            &name,
            &port,
            ctx.services,
        ))),
        None if mentions_mict(&port) => Some(CellValue::text(MANUAL_CHECK)),
        None => None,
    }
}

fn lead_sl_from_desc(_ctx: &ResolveContext<'_>, row: &RowData) -> Option<CellValue> {
    let desc = row.text(Field::ServiceDesc)?;
    Some(CellValue::Text(leading_sl_before_dash(&desc)))
}

fn participants(ctx: &ResolveContext<'_>, _row: &RowData) -> Option<CellValue> {
    let col = column_index(&ctx.layout.participants_column)?;
    let summary = format_participants(ctx.grid, col);
    if summary.is_empty() {
        None
    } else {
        Some(CellValue::Text(summary))
    }
}

fn vessel_count_from_fleet(_ctx: &ResolveContext<'_>, row: &RowData) -> Option<CellValue> {
    let fleet = row.text(Field::ShipsUsed)?;
    let (count, _) = vessel_size_and_count(&fleet);
    count.map(CellValue::from)
}

fn vessel_size_from_fleet(_ctx: &ResolveContext<'_>, row: &RowData) -> Option<CellValue> {
    let size = match row.text(Field::ShipsUsed) {
        Some(fleet) => vessel_size_and_count(&fleet).1,
        None => NO_SIZE.to_string(),
    };
    Some(CellValue::Text(size))
}
