//! Builds the canonical [`OrderView`] from a raw backend record.
//!
//! The build is total, pure, and deterministic: every optional backend
//! section degrades to an empty or zero value instead of failing, since
//! orders legitimately lack shipping, tax, payment or address data in early
//! lifecycle states.

use orderdesk_core::{CurrencyCode, DeliveryType};
use rust_decimal::Decimal;

use crate::backend::types::{RawAddress, RawLineItem, RawOrderRecord};

use super::{CustomerName, OrderLine, OrderView, PaymentView, ShippingAddress, TaxLine};

/// Locale key preferred for line-item display names.
pub const PRIMARY_LOCALE: &str = "en-US";

/// Shown when a line's variant carries no image.
const FALLBACK_IMAGE_URL: &str = "https://placehold.co/24x24?text=%3F";

/// The backend does not report a payment method, only payment ids.
const DEFAULT_PAYMENT_METHOD: &str = "Credit Card";

/// Project a raw backend record into the canonical view.
#[must_use]
pub fn build(raw: RawOrderRecord) -> OrderView {
    let currency = CurrencyCode::parse_or_default(&raw.total_price.currency_code);

    let grand_total = minor_units(raw.total_price.cent_amount);
    let shipping_cost = raw
        .shipping_info
        .as_ref()
        .map_or(Decimal::ZERO, |s| minor_units(s.price.cent_amount));
    let sub_total = grand_total - shipping_cost;

    let lines: Vec<OrderLine> = raw.line_items.iter().map(convert_line).collect();
    let discount = lines.iter().map(|l| l.line_total).sum::<Decimal>() - sub_total;

    let tax_breakdown: Vec<TaxLine> = raw.taxed_price.as_ref().map_or_else(Vec::new, |taxed| {
        let taxable_base = minor_units(taxed.total_net.cent_amount);
        taxed
            .tax_portions
            .iter()
            .map(|portion| TaxLine {
                description: portion.name.clone(),
                rate_percent: portion.rate * 100.0,
                taxable_base,
                tax_amount: minor_units(portion.amount.cent_amount),
            })
            .collect()
    });

    let payments: Vec<PaymentView> = raw.payment_info.as_ref().map_or_else(Vec::new, |info| {
        info.payments
            .iter()
            .map(|payment| PaymentView {
                method: DEFAULT_PAYMENT_METHOD.to_string(),
                amount: grand_total,
                transaction_id: payment.id.clone(),
            })
            .collect()
    });

    let customer = raw
        .shipping_address
        .as_ref()
        .map_or_else(CustomerName::default, |address| CustomerName {
            first_name: address.first_name.clone(),
            last_name: address.last_name.clone(),
        });

    let shipping_address = raw.shipping_address.as_ref().map(convert_address);

    let delivery_type = raw
        .custom
        .as_ref()
        .and_then(|custom| custom.fields.delivery_type.as_deref())
        .map_or(DeliveryType::StandardShipment, DeliveryType::from_tag);

    let is_approved = raw
        .custom
        .as_ref()
        .is_some_and(|custom| custom.fields.is_approved);

    let status = raw.order_state;

    OrderView {
        id: raw.id,
        version: raw.version,
        status,
        is_approved,
        customer,
        lines,
        sub_total,
        shipping_cost,
        discount,
        grand_total,
        tax_breakdown,
        payments,
        shipping_address,
        delivery_type,
        currency,
        created_at: raw.created_at,
        updated_at: raw.last_modified_at,
        legal_next_states: status.legal_next_states().to_vec(),
    }
}

fn minor_units(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

fn convert_line(item: &RawLineItem) -> OrderLine {
    let line_total = minor_units(item.total_price.cent_amount);

    // No per-unit price reported: the line total stands in, matching how
    // the dashboard has always rendered such lines.
    let unit_price = item
        .price
        .as_ref()
        .map_or(line_total, |price| minor_units(price.value.cent_amount));

    let name = item
        .name
        .get(PRIMARY_LOCALE)
        .or_else(|| item.name.values().next())
        .cloned()
        .unwrap_or_default();

    let sku = item
        .variant
        .as_ref()
        .map_or_else(String::new, |variant| variant.sku.clone());

    let image_url = item
        .variant
        .as_ref()
        .and_then(|variant| variant.images.first())
        .map_or_else(|| FALLBACK_IMAGE_URL.to_string(), |image| image.url.clone());

    OrderLine {
        name,
        sku,
        unit_price,
        quantity: item.quantity,
        line_total,
        image_url,
    }
}

fn convert_address(address: &RawAddress) -> ShippingAddress {
    let street_line1 = format!("{} {}", address.street_name, address.street_number)
        .trim()
        .to_string();

    ShippingAddress {
        company: String::new(),
        street_line1,
        street_line2: String::new(),
        city: address.city.clone(),
        province: address.region.clone(),
        postal_code: address.postal_code.clone(),
        country: address.country.clone(),
        phone_number: address.mobile.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderdesk_core::{OrderStatus, Version};
    use serde_json::json;

    fn record(value: serde_json::Value) -> RawOrderRecord {
        serde_json::from_value(value).expect("fixture must deserialize")
    }

    fn base_record() -> serde_json::Value {
        json!({
            "id": "ord-100",
            "version": 4,
            "orderState": "Open",
            "createdAt": "2026-03-10T08:15:00Z",
            "lastModifiedAt": "2026-03-11T16:40:00Z",
            "totalPrice": { "centAmount": 12345, "currencyCode": "EUR" },
        })
    }

    #[test]
    fn grand_total_converts_minor_units() {
        let view = build(record(base_record()));
        assert_eq!(view.grand_total, Decimal::new(12345, 2));
        assert_eq!(view.currency, CurrencyCode::EUR);
        assert_eq!(view.version, Version::new(4));
    }

    #[test]
    fn subtotal_is_grand_total_less_shipping() {
        let mut raw = base_record();
        raw["shippingInfo"] = json!({ "price": { "centAmount": 495, "currencyCode": "EUR" } });

        let view = build(record(raw));
        assert_eq!(view.shipping_cost, Decimal::new(495, 2));
        assert_eq!(view.sub_total, Decimal::new(11850, 2));
        assert_eq!(view.grand_total, view.sub_total + view.shipping_cost);
    }

    #[test]
    fn discount_is_line_totals_minus_subtotal() {
        let mut raw = base_record();
        raw["totalPrice"] = json!({ "centAmount": 7000, "currencyCode": "EUR" });
        raw["lineItems"] = json!([
            { "id": "li-1", "quantity": 1, "totalPrice": { "centAmount": 5000 } },
            { "id": "li-2", "quantity": 1, "totalPrice": { "centAmount": 3000 } },
        ]);

        let view = build(record(raw));
        assert_eq!(view.sub_total, Decimal::new(7000, 2));
        assert_eq!(view.discount, Decimal::new(1000, 2));
    }

    #[test]
    fn discount_with_no_lines_is_negative_subtotal() {
        let view = build(record(base_record()));
        assert!(view.lines.is_empty());
        assert_eq!(view.discount, -view.sub_total);
    }

    #[test]
    fn missing_sections_degrade_to_defaults() {
        let view = build(record(base_record()));
        assert_eq!(view.shipping_cost, Decimal::ZERO);
        assert!(view.tax_breakdown.is_empty());
        assert!(view.payments.is_empty());
        assert!(view.shipping_address.is_none());
        assert_eq!(view.customer, CustomerName::default());
        assert_eq!(view.delivery_type, DeliveryType::StandardShipment);
        assert!(!view.is_approved);
    }

    #[test]
    fn tax_rows_share_one_net_base() {
        let mut raw = base_record();
        raw["taxedPrice"] = json!({
            "totalNet": { "centAmount": 10000, "currencyCode": "EUR" },
            "taxPortions": [
                { "name": "VAT", "rate": 0.19, "amount": { "centAmount": 1900 } },
                { "name": "Reduced VAT", "rate": 0.07, "amount": { "centAmount": 700 } },
            ],
        });

        let view = build(record(raw));
        assert_eq!(view.tax_breakdown.len(), 2);
        for tax in &view.tax_breakdown {
            assert_eq!(tax.taxable_base, Decimal::new(10000, 2));
        }
        assert!((view.tax_breakdown[0].rate_percent - 19.0).abs() < 1e-9);
        assert_eq!(view.tax_breakdown[0].description, "VAT");
        assert_eq!(view.tax_breakdown[1].tax_amount, Decimal::new(700, 2));
    }

    #[test]
    fn line_name_prefers_primary_locale() {
        let mut raw = base_record();
        raw["lineItems"] = json!([{
            "id": "li-1",
            "name": { "de-DE": "Stuhl", "en-US": "Chair" },
            "quantity": 2,
            "totalPrice": { "centAmount": 4000 },
        }]);

        let view = build(record(raw));
        assert_eq!(view.lines[0].name, "Chair");
    }

    #[test]
    fn line_name_falls_back_to_first_sorted_locale() {
        let mut raw = base_record();
        raw["lineItems"] = json!([{
            "id": "li-1",
            "name": { "fr-FR": "Chaise", "de-DE": "Stuhl" },
            "quantity": 1,
            "totalPrice": { "centAmount": 4000 },
        }]);

        let view = build(record(raw));
        assert_eq!(view.lines[0].name, "Stuhl");
    }

    #[test]
    fn line_without_variant_price_uses_line_total_as_unit_price() {
        let mut raw = base_record();
        raw["lineItems"] = json!([
            {
                "id": "li-1",
                "quantity": 3,
                "price": { "value": { "centAmount": 1500 } },
                "totalPrice": { "centAmount": 4500 },
                "variant": { "sku": "SKU-9", "images": [{ "url": "https://cdn.example/9.jpg" }] },
            },
            {
                "id": "li-2",
                "quantity": 2,
                "totalPrice": { "centAmount": 2000 },
            },
        ]);

        let view = build(record(raw));
        assert_eq!(view.lines[0].unit_price, Decimal::new(1500, 2));
        assert_eq!(view.lines[0].sku, "SKU-9");
        assert_eq!(view.lines[0].image_url, "https://cdn.example/9.jpg");
        assert_eq!(view.lines[1].unit_price, Decimal::new(2000, 2));
        assert_eq!(view.lines[1].sku, "");
        assert_eq!(view.lines[1].image_url, FALLBACK_IMAGE_URL);
    }

    #[test]
    fn payments_carry_default_method_and_grand_total() {
        let mut raw = base_record();
        raw["paymentInfo"] = json!({ "payments": [{ "id": "pay-77" }] });

        let view = build(record(raw));
        assert_eq!(view.payments.len(), 1);
        assert_eq!(view.payments[0].method, "Credit Card");
        assert_eq!(view.payments[0].amount, view.grand_total);
        assert_eq!(view.payments[0].transaction_id, "pay-77");
    }

    #[test]
    fn address_concatenates_street_and_defaults_missing_fields() {
        let mut raw = base_record();
        raw["shippingAddress"] = json!({
            "firstName": "Ada",
            "lastName": "Berg",
            "streetName": "Lindenweg",
            "streetNumber": "12a",
            "city": "Bremen",
            "postalCode": "28195",
            "country": "DE",
        });

        let view = build(record(raw));
        let address = view.shipping_address.expect("address present");
        assert_eq!(address.street_line1, "Lindenweg 12a");
        assert_eq!(address.street_line2, "");
        assert_eq!(address.company, "");
        assert_eq!(address.province, "");
        assert_eq!(address.phone_number, "");
        assert_eq!(view.customer.first_name, "Ada");
        assert_eq!(view.customer.last_name, "Berg");
    }

    #[test]
    fn delivery_type_reads_custom_field() {
        let mut raw = base_record();
        raw["custom"] = json!({ "fields": { "isApproved": true, "deliveryType": "pickup" } });

        let view = build(record(raw));
        assert_eq!(view.delivery_type, DeliveryType::Pickup);
        assert!(view.is_approved);
    }

    #[test]
    fn legal_next_states_follow_the_table() {
        let mut raw = base_record();
        raw["orderState"] = json!("Shipped");

        let view = build(record(raw));
        assert_eq!(
            view.legal_next_states,
            vec![OrderStatus::Delivered, OrderStatus::Returned]
        );
    }

    #[test]
    fn unknown_status_yields_no_next_states() {
        let mut raw = base_record();
        raw["orderState"] = json!("Archived");

        let view = build(record(raw));
        assert_eq!(view.status, OrderStatus::Unknown);
        assert!(view.legal_next_states.is_empty());
    }
}
