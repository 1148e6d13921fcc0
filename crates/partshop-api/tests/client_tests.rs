mod common;

use serde_json::json;

use partshop_api::ApiClient;
use partshop_core::traits::{AdminApi, CartApi, CatalogApi};
use partshop_core::types::{Brand, ClassifyRequest, DetectedMatch};
use partshop_core::Error;

use common::{serve, settings};

#[tokio::test]
async fn classify_posts_query_and_decodes_brands() -> anyhow::Result<()> {
    let body = json!({
        "success": true,
        "data": {
            "type": "brand",
            "results": [{"id": "b1", "name": "Maruti Suzuki"}],
            "total": 1
        }
    });
    let backend = serve(vec![(200, body.to_string())]).await;
    let client = ApiClient::new(&settings(&backend.base_url))?;

    let request = ClassifyRequest { query: "maruti suzuki".into(), limit: 20, page: 1 };
    let classification = client.classify(&request).await?;
    assert_eq!(
        classification.matched,
        DetectedMatch::Brand(vec![Brand { id: "b1".into(), name: "Maruti Suzuki".into() }])
    );

    let seen = backend.requests();
    assert_eq!(seen[0].method, "POST");
    assert_eq!(seen[0].path, "/category/api/search/classify");
    assert_eq!(seen[0].header("authorization"), Some("Bearer tok-123"));
    assert_eq!(seen[0].json(), json!({"query": "maruti suzuki", "limit": 20, "page": 1}));
    Ok(())
}

#[tokio::test]
async fn categories_are_read_from_nested_data() -> anyhow::Result<()> {
    let body = json!({"data": {"categories": [{"_id": "c1", "category_name": "Brakes"}]}});
    let backend = serve(vec![(200, body.to_string())]).await;
    let client = ApiClient::new(&settings(&backend.base_url))?;

    let categories = client.categories_for_vehicle_type("vt 1").await?;
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name, "Brakes");

    let seen = backend.requests();
    assert_eq!(seen[0].path, "/category/api/category/type/vt%201", "ids are percent-encoded");
    Ok(())
}

#[tokio::test]
async fn variants_accept_bare_arrays_and_envelopes() -> anyhow::Result<()> {
    let bare = json!([{"id": "v1", "variant_name": "LXi"}, {"id": "v2", "name": "VXi"}]);
    let wrapped = json!({"success": true, "data": [{"id": "v3", "name": "ZXi"}]});
    let backend = serve(vec![(200, bare.to_string()), (200, wrapped.to_string())]).await;
    let client = ApiClient::new(&settings(&backend.base_url))?;

    let names: Vec<String> = client.variants_for_model("m1").await?.into_iter().map(|v| v.name).collect();
    assert_eq!(names, vec!["LXi", "VXi"]);
    let names: Vec<String> = client.variants_for_model("m1").await?.into_iter().map(|v| v.name).collect();
    assert_eq!(names, vec!["ZXi"]);

    let seen = backend.requests();
    assert!(seen.iter().all(|r| r.path == "/category/api/variant/model/m1"));
    Ok(())
}

#[tokio::test]
async fn unsuccessful_envelope_becomes_api_error() -> anyhow::Result<()> {
    let body = json!({"success": false, "message": "Item is out of stock"});
    let backend = serve(vec![(200, body.to_string())]).await;
    let client = ApiClient::new(&settings(&backend.base_url))?;

    match client.set_quantity("p1", 3).await {
        Err(Error::Api(message)) => assert_eq!(message, "Item is out of stock"),
        other => panic!("expected api error, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn error_status_keeps_backend_message() -> anyhow::Result<()> {
    let body = json!({"success": false, "message": "Dealer not found"});
    let backend = serve(vec![(404, body.to_string())]).await;
    let client = ApiClient::new(&settings(&backend.base_url))?;

    let err = client.set_dealer_active("d9", false).await.expect_err("404 must fail");
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "HTTP 404: Dealer not found");

    let seen = backend.requests();
    assert_eq!(seen[0].method, "PATCH");
    assert_eq!(seen[0].path, "/admin/api/dealers/d9/status");
    assert_eq!(seen[0].json(), json!({"isActive": false}));
    Ok(())
}

#[tokio::test]
async fn cart_quantity_is_put_to_item_path() -> anyhow::Result<()> {
    let body = json!({"data": {"id": "cart1", "items": [
        {"productId": "p1", "name": "Brake pad", "unitPrice": 250.0, "quantity": 3}
    ]}});
    let backend = serve(vec![(200, body.to_string())]).await;
    let client = ApiClient::new(&settings(&backend.base_url))?;

    let cart = client.set_quantity("p1", 3).await?;
    assert_eq!(cart.item_count(), 3);
    assert!((cart.subtotal() - 750.0).abs() < f64::EPSILON);

    let seen = backend.requests();
    assert_eq!(seen[0].method, "PUT");
    assert_eq!(seen[0].path, "/cart/api/cart/items/p1");
    assert_eq!(seen[0].json(), json!({"quantity": 3}));
    Ok(())
}

#[test]
fn bad_base_url_is_a_config_error() {
    let mut s = settings("not a url");
    assert!(matches!(ApiClient::new(&s), Err(Error::InvalidConfig(_))));
    s.base_url = "mailto:ops@example.test".into();
    assert!(matches!(ApiClient::new(&s), Err(Error::InvalidConfig(_))));
}
