//! Schema classifier: which custom fields exceed their limit.

use fg_common::{FieldDescriptor, LimitKind};

use crate::describe::RawField;
use crate::policy::LimitPolicy;

/// Filter one object's raw field list down to the custom fields whose
/// policy-designated attribute strictly exceeds its threshold.
///
/// Output order follows source field order. A field missing the designated
/// attribute is treated as not exceeding. Types unknown to the policy are
/// not subject to the audit.
pub fn classify_fields(fields: &[RawField], policy: &LimitPolicy) -> Vec<FieldDescriptor> {
    fields
        .iter()
        .filter_map(|field| {
            if !field.custom {
                return None;
            }
            let limit = policy.threshold_for(&field.field_type)?;
            let declared = match limit.kind {
                LimitKind::Length => field.length,
                LimitKind::Precision => field.precision,
            }?;
            (declared > limit.threshold).then(|| FieldDescriptor {
                name: field.name.clone(),
                field_type: field.field_type.clone(),
                limit_kind: limit.kind,
                declared_length: field.length,
                declared_precision: field.precision,
                extra_type_info: field.extra_type_info.clone(),
            })
        })
        .collect()
}
