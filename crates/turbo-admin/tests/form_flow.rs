//! Product form driven through the REST client over a scripted transport.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use pretty_assertions::assert_eq;
use serde_json::json;
use turbo_admin::prelude::*;
use turbo_admin::{Method, RequestBody, RequestBuilder, Response, Transport};

#[derive(Default)]
struct Scripted {
    responses: RefCell<VecDeque<(u16, String)>>,
    sent: RefCell<Vec<RequestBuilder>>,
}

impl Scripted {
    fn reply(self, status: u16, body: serde_json::Value) -> Self {
        self.responses
            .borrow_mut()
            .push_back((status, body.to_string()));
        self
    }
}

impl Transport for Scripted {
    fn send(&self, request: RequestBuilder) -> Result<Response, AdminError> {
        self.sent.borrow_mut().push(request);
        let (status, body) = self
            .responses
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| AdminError::RequestError("unexpected request".into()))?;
        Ok(Response::new(status, HashMap::new(), body.into_bytes()))
    }
}

fn sent_json(request: &RequestBuilder) -> serde_json::Value {
    match &request.body {
        RequestBody::Bytes(bytes) => serde_json::from_slice(bytes).unwrap(),
        other => panic!("expected json body, got {:?}", other),
    }
}

#[test]
fn new_product_is_built_uploaded_and_created() {
    let transport = Scripted::default()
        .reply(200, json!({"data": {"url": "https://cdn.example.com/red.png"}}))
        .reply(
            201,
            json!({"data": {
                "_id": "p-9",
                "name": "Linen Shirt",
                "variants": [
                    {"name": "Color", "images": ["https://cdn.example.com/red.png"], "options": ["Red"]},
                    {"name": "Size", "images": [], "options": ["M", "L"]}
                ],
                "skuList": [
                    {"tierIndex": [0, 0], "isDefault": true, "price": 30, "quantity": 2},
                    {"tierIndex": [0, 1], "isDefault": true, "price": 0, "quantity": 0}
                ]
            }}),
        );
    let client = AdminClient::new("https://admin.example.com/api", transport)
        .with_token("secret")
        .with_client_id("dashboard");

    let mut form = ProductForm::new("Linen Shirt", DEFAULT_AXES, BuilderConfig::default());
    form.set_option(0, 0, "Red").unwrap();
    form.set_option(1, 0, "M").unwrap();
    form.add_option(1, "L").unwrap();
    form.update_cell(0, SkuField::Price, "30").unwrap();
    form.update_cell(0, SkuField::Quantity, "2").unwrap();

    let file = ImageFile::new("red.png", vec![0x89, b'P', b'N', b'G']).unwrap();
    form.upload_axis_image(&client, "Color", &file).unwrap();

    let saved = form.submit(&client).unwrap();
    assert_eq!(saved.id, Some(ProductId::new("p-9")));
    assert!(!form.to_record().is_new());

    let sent = client.transport().sent.borrow();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].method, Method::Post);
    assert_eq!(sent[0].url, "https://admin.example.com/api/upload/image");
    assert_eq!(sent[1].url, "https://admin.example.com/api/products");
    for request in sent.iter() {
        assert_eq!(request.header_value("Authorization"), Some("Bearer secret"));
        assert_eq!(request.header_value("X-Client-Id"), Some("dashboard"));
    }

    let body = sent_json(&sent[1]);
    assert_eq!(
        body["variants"],
        json!([
            {"name": "Color", "images": ["https://cdn.example.com/red.png"], "options": ["Red"]},
            {"name": "Size", "images": [], "options": ["M", "L"]}
        ])
    );
    assert_eq!(
        body["skuList"],
        json!([
            {"tierIndex": [0, 0], "isDefault": true, "price": 30.0, "quantity": 2},
            {"tierIndex": [0, 1], "isDefault": true, "price": 0.0, "quantity": 0}
        ])
    );
}

#[test]
fn fetched_product_keeps_prices_when_growing() {
    let transport = Scripted::default()
        .reply(
            200,
            json!({"data": {
                "_id": "p-3",
                "name": "Mug",
                "variants": [
                    {"name": "Color", "images": [], "options": ["White"]},
                    {"name": "Size", "images": [], "options": ["350ml"]}
                ],
                "skuList": [{"tierIndex": [0, 0], "isDefault": true, "price": 8.5, "quantity": 40}],
                "sold": 120
            }}),
        )
        .reply(200, json!({"data": {"_id": "p-3", "name": "Mug"}}));
    let client = AdminClient::new("https://admin.example.com/api", transport).with_token("t");

    let record = client.fetch_product(&ProductId::new("p-3")).unwrap();
    let mut form = ProductForm::from_record(record, BuilderConfig::default());
    form.add_option(1, "500ml").unwrap();
    form.submit(&client).unwrap();

    let sent = client.transport().sent.borrow();
    assert_eq!(sent[1].method, Method::Put);
    assert_eq!(sent[1].url, "https://admin.example.com/api/products/p-3");

    let body = sent_json(&sent[1]);
    assert_eq!(body["sold"], 120);
    assert_eq!(body["skuList"][0]["price"], 8.5);
    assert_eq!(body["skuList"][0]["quantity"], 40);
    assert_eq!(body["skuList"][1]["tierIndex"], json!([0, 1]));
    assert_eq!(body["skuList"][1]["price"], 0.0);
}

#[test]
fn server_rejection_surfaces_message() {
    let transport = Scripted::default().reply(400, json!({"message": "Name already taken"}));
    let client = AdminClient::new("https://admin.example.com/api", transport);

    let mut form = ProductForm::new("Mug", DEFAULT_AXES, BuilderConfig::default());
    let err = form.submit(&client).unwrap_err();
    assert_eq!(err.to_string(), "HTTP 400: Name already taken");
    assert!(form.to_record().is_new());
}

#[test]
fn non_product_save_response_keeps_the_draft() {
    let transport =
        Scripted::default().reply(201, json!({"message": "Created", "metadata": {"_id": "p1"}}));
    let client = AdminClient::new("https://admin.example.com/api", transport).with_token("t");

    let mut form = ProductForm::new("Linen Shirt", DEFAULT_AXES, BuilderConfig::default());
    form.set_option(0, 0, "Red").unwrap();
    form.set_option(1, 0, "M").unwrap();
    form.add_option(1, "L").unwrap();
    let before = form.to_record();

    let err = form.submit(&client).unwrap_err();
    assert!(matches!(err, AdminError::ParseError(_)));
    assert_eq!(form.to_record(), before);
    assert_eq!(form.state().skus().len(), 2);
}
