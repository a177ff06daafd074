/// Wire shape of records as kept in the durable slots
pub mod wire_format_tests {
    use serde_json::json;

    use crate::*;

    #[test]
    fn record_serialises_flat_with_camel_case_names() {
        let rec = Schedule::new(
            RecordId::from("1718000000000"),
            ScheduleFields {
                title: "Site survey".into(),
                datetime: "2024-06-10T09:30".into(),
                client_type: "newclient".into(),
                email_or_number: "ops@example.com".into(),
                ..Default::default()
            },
        );
        let value = serde_json::to_value(&rec).unwrap();
        assert_eq!(value["id"], "1718000000000");
        assert_eq!(value["title"], "Site survey");
        assert_eq!(value["clientType"], "newclient");
        assert_eq!(value["emailOrNumber"], "ops@example.com");
        assert!(value.get("fields").is_none());
    }

    #[test]
    fn absent_optionals_are_omitted() {
        let rec = Product::new(
            RecordId::from(7u64),
            ProductFields { name: "Camera".into(), category: "CCTV".into(), quantity: 5, ..Default::default() },
        );
        let value = serde_json::to_value(&rec).unwrap();
        assert_eq!(value, json!({"id": "7", "name": "Camera", "category": "CCTV", "quantity": 5}));
    }

    #[test]
    fn device_type_keeps_its_json_name() {
        let rec = Device::new(RecordId::from("1"), DeviceFields { name: "NVR".into(), kind: "recorder".into() });
        let value = serde_json::to_value(&rec).unwrap();
        assert_eq!(value["type"], "recorder");
    }

    #[test]
    fn partial_legacy_objects_still_parse() {
        // Product pages once saved no quantity; RMA entries may lack contact data.
        let products: Vec<Product> =
            serde_json::from_str(r#"[{"id":"1","name":"Cam","category":"CCTV","description":"x"}]"#).unwrap();
        assert_eq!(products[0].fields.quantity, 0);
        assert_eq!(products[0].fields.description.as_deref(), Some("x"));

        let rmas: Vec<Rma> = serde_json::from_str(
            r#"[{"id":"2","itemReturned":"Switch","purchasedDate":"2023-01-01","warranty":true,"repairType":"swap"}]"#,
        )
        .unwrap();
        assert!(rmas[0].fields.warranty);
        assert!(rmas[0].fields.company_name.is_none());
    }

    #[test]
    fn installation_devices_round_trip_in_order() {
        let text = r#"[{"id":"3","project":"HQ","company":"Acme","dateTime":"2024-01-01T08:00","location":"Main St","devices":["B","A"]}]"#;
        let items: Vec<Installation> = serde_json::from_str(text).unwrap();
        assert_eq!(items[0].fields.devices, vec!["B", "A"]);
        let back: Vec<Installation> = serde_json::from_str(&serde_json::to_string(&items).unwrap()).unwrap();
        assert_eq!(back, items);
    }

    #[test]
    fn image_blob_is_uninterpreted() {
        let blob = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR4nGNgYGD4DwABBAEAwS2OUAAAAABJRU5ErkJggg==";
        let rec = Product::new(
            RecordId::from("9"),
            ProductFields { name: "P".into(), category: "C".into(), image: Some(blob.into()), ..Default::default() },
        );
        let back: Product = serde_json::from_str(&serde_json::to_string(&rec).unwrap()).unwrap();
        assert_eq!(back.fields.image.as_deref(), Some(blob));
    }
}

/// Required-field checks and slot naming
pub mod validation_tests {
    use std::collections::HashSet;

    use crate::errors::ModelError;
    use crate::*;

    #[test]
    fn slot_names_are_distinct() {
        let slots: HashSet<&str> = [
            ScheduleFields::SLOT,
            RenewalFields::SLOT,
            RmaFields::SLOT,
            InstallationFields::SLOT,
            ProductFields::SLOT,
            DeviceFields::SLOT,
        ]
        .into_iter()
        .collect();
        assert_eq!(slots.len(), 6);
    }

    #[test]
    fn schedule_requires_title_and_datetime() {
        let mut s = ScheduleFields { title: "T".into(), datetime: "2024-01-01T10:00".into(), ..Default::default() };
        assert!(s.validate().is_ok());
        s.client_type = "vip".into();
        assert!(matches!(s.validate(), Err(ModelError::Validation(_))));
        s.client_type = "underwarranty".into();
        s.datetime.clear();
        assert!(matches!(s.validate(), Err(ModelError::MissingField { field: "datetime", .. })));
    }

    #[test]
    fn rma_product_device_required_fields() {
        assert!(RmaFields::default().validate().is_err());
        let rma = RmaFields {
            item_returned: "Switch".into(),
            purchased_date: "2023-05-01".into(),
            repair_type: "replace".into(),
            ..Default::default()
        };
        assert!(rma.validate().is_ok());

        let product = ProductFields { name: "Cam".into(), ..Default::default() };
        assert!(matches!(product.validate(), Err(ModelError::MissingField { field: "category", .. })));
        assert!(!product.in_stock());

        let device = DeviceFields { name: "NVR".into(), kind: String::new() };
        assert!(matches!(device.validate(), Err(ModelError::MissingField { field: "type", .. })));
    }

    #[test]
    fn installation_requires_four_fields() {
        let inst = InstallationFields {
            project: "HQ".into(),
            company: "Acme".into(),
            date_time: "2024-02-02T10:00".into(),
            location: String::new(),
            devices: vec![],
        };
        assert!(matches!(inst.validate(), Err(ModelError::MissingField { field: "location", .. })));
    }
}
