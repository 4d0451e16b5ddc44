use super::{PanaccessClient, PanaccessError};
use crate::domain::{GroupOp, Params, Product, ProductId, Rule};

const LIST_PRODUCTS: &str = "getListOfProducts";

impl PanaccessClient {
    /// List products. `limit` defaults to 1000.
    pub async fn list_products(&self, params: Params) -> Result<Vec<Product>, PanaccessError> {
        self.call(LIST_PRODUCTS, params.with_default_limit())
            .await?
            .decode_with(crate::transport::decode_product_list)
    }

    /// List products matching `rules`. `limit` defaults to 1000.
    pub async fn list_products_filtered(
        &self,
        params: Params,
        group_op: GroupOp,
        rules: Vec<Rule>,
    ) -> Result<Vec<Product>, PanaccessError> {
        self.call_with_filters(LIST_PRODUCTS, params.with_default_limit(), group_op, rules)
            .await?
            .decode_with(crate::transport::decode_product_list)
    }

    /// Look up a single product by id.
    pub async fn product(&self, id: ProductId) -> Result<Product, PanaccessError> {
        let products = self
            .list_products_filtered(
                Params::new(),
                GroupOp::And,
                vec![Rule::eq(ProductId::FIELD, id.to_string())],
            )
            .await?;
        products
            .into_iter()
            .find(|product| product.id == id)
            .ok_or_else(|| PanaccessError::NotFound {
                entity: "product",
                key: id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;

    #[tokio::test]
    async fn list_products_applies_default_limit_and_decodes() {
        let transport = ScriptedTransport::new().reply(ok(
            r#"{"count": 1, "productEntries": [{"productId": 42, "name": "Sports HD"}]}"#,
        ));
        let client = make_client(&[SERVER_A], transport.clone());

        let products = client.list_products(Params::new()).await.unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Sports HD");
        let request = &transport.requests()[0];
        assert!(request.url.contains("f=getListOfProducts"));
        assert_param(&request.params, "limit", "1000");
    }

    #[tokio::test]
    async fn list_products_keeps_caller_limit() {
        let transport = ScriptedTransport::new().reply(ok(r#"{"productEntries": []}"#));
        let client = make_client(&[SERVER_A], transport.clone());

        client
            .list_products(Params::new().with("limit", "10"))
            .await
            .unwrap();

        let params = &transport.requests()[0].params;
        assert_param(params, "limit", "10");
        assert_eq!(params.iter().filter(|(k, _)| k == "limit").count(), 1);
    }

    #[tokio::test]
    async fn product_lookup_reports_missing_product() {
        let transport = ScriptedTransport::new().reply(ok(r#"{"productEntries": []}"#));
        let client = make_client(&[SERVER_A], transport.clone());

        let err = client.product(ProductId::new(42)).await.unwrap_err();

        assert!(matches!(
            err,
            PanaccessError::NotFound {
                entity: "product",
                ..
            }
        ));
        assert_param(
            &transport.requests()[0].params,
            "filters",
            r#"{"groupOp":"AND","rules":[{"field":"productId","op":"eq","data":"42"}]}"#,
        );
    }

    #[tokio::test]
    async fn unsuccessful_listing_without_error_code_is_api_error() {
        let transport = ScriptedTransport::new().reply(r#"{"success": false}"#);
        let client = make_client(&[SERVER_A], transport);

        let err = client.list_products(Params::new()).await.unwrap_err();
        assert!(matches!(err, PanaccessError::Api { .. }));
    }
}
