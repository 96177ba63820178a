use super::*;

#[test]
fn format_date_plain_date() {
    assert_eq!(format_date("2024-01-01"), "1/1/2024");
}

#[test]
fn format_date_ignores_time_and_zone() {
    assert_eq!(format_date("2023-12-31T23:59:59.123456+00:00"), "12/31/2023");
    assert_eq!(format_date("2024-07-04T08:00:00Z"), "7/4/2024");
}

#[test]
fn format_date_passes_through_unparseable_values() {
    assert_eq!(format_date("yesterday"), "yesterday");
    assert_eq!(format_date(""), "");
    assert_eq!(format_date("2024-13-01"), "2024-13-01");
    assert_eq!(format_date("24-01-01xxxx"), "24-01-01xxxx");
}
