//! Well-known field names of the price table layout.

/// Identity key: the item code, unique within one version.
pub const CODE: &str = "코드";

/// Display key: the model name shown next to the code.
pub const MODEL: &str = "모델";

/// Precomputed search text attached to cached rows.
pub const SEARCHABLE_TEXT: &str = "_searchableText";

/// Precomputed sort position attached to cached rows.
pub const SORT_INDEX: &str = "_sortIndex";

/// Fields that never take part in comparison.
pub const TRANSIENT_FIELDS: &[&str] = &[SEARCHABLE_TEXT, SORT_INDEX];

/// Fields emitted first, in this order, when they are present.
pub const PRIORITY_FIELDS: &[&str] = &[MODEL, CODE, "브랜드", "제품명", "단가", "할인율"];

/// Grade and deduction price columns of a device grading sheet.
pub const PRICE_FIELDS: &[&str] = &[
    "A급",
    "A-급",
    "B+급",
    "B급",
    "통단가",
    "폐폰",
    "서브LCD",
    "액정볼록",
    "LCD점멍_미파손",
    "내부LCD",
    "검불차감",
    "내_외부LCD",
    "카메라",
    "카메라차감",
    "내부잔상차감_중",
    "내부잔상차감_강",
    "내부잔상차감_대",
    "서브잔상차감_중",
    "서브잔상차감_강",
    "서브잔상차감_대",
];

/// Returns `true` if `field` is a transient cache field.
pub fn is_transient(field: &str) -> bool {
    TRANSIENT_FIELDS.contains(&field)
}
