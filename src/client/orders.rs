use tracing::{debug, info};

use super::{PanaccessClient, PanaccessError};
use crate::domain::{
    AddOrder, GroupOp, Order, OrderId, Params, ProductId, Rule, SubscriberCode,
};

const LIST_ORDERS: &str = "getListOfOrders";
const ADD_FLEXIBLE_ORDER: &str = "addFlexibleOrderToSubscriber";
const TERMINATE_ORDER: &str = "terminateOrderOfSubscriber";

const SMARTCARDS_FIELD: &str = "smartcards[]";
const ONLY_SPECIFIED_SMARTCARDS_FIELD: &str = "onlySpecifiedSmartcards";

impl PanaccessClient {
    /// List orders. `limit` defaults to 1000.
    pub async fn list_orders(&self, params: Params) -> Result<Vec<Order>, PanaccessError> {
        self.call(LIST_ORDERS, params.with_default_limit())
            .await?
            .decode_with(crate::transport::decode_order_list)
    }

    /// List orders matching `rules`. `limit` defaults to 1000.
    pub async fn list_orders_filtered(
        &self,
        params: Params,
        group_op: GroupOp,
        rules: Vec<Rule>,
    ) -> Result<Vec<Order>, PanaccessError> {
        self.call_with_filters(LIST_ORDERS, params.with_default_limit(), group_op, rules)
            .await?
            .decode_with(crate::transport::decode_order_list)
    }

    /// Book a product for a subscriber on every card that lacks it.
    ///
    /// Fails with [`PanaccessError::NotFound`] when the subscriber or the
    /// product does not exist.
    pub async fn add_order_to_subscriber(&self, request: &AddOrder) -> Result<(), PanaccessError> {
        let code = request.subscriber_code();
        if !self.subscriber_exists(code).await? {
            return Err(PanaccessError::NotFound {
                entity: "subscriber",
                key: code.as_str().to_owned(),
            });
        }

        let cards = self.subscriber_smartcards(code).await?;
        let product = self.product(request.product_id()).await?;

        let mut params = Params::new()
            .with(SubscriberCode::FIELD, code.as_str())
            .with(ProductId::FIELD, request.product_id().to_string())
            .with(AddOrder::ACTIVATION_TIME_FIELD, request.activation_time())
            .with(AddOrder::EXPIRY_TIME_FIELD, request.expiry_time())
            .with(ONLY_SPECIFIED_SMARTCARDS_FIELD, "true");
        for card in cards.iter().filter(|card| !card.has_product(&product.name)) {
            params.add(SMARTCARDS_FIELD, card.sn.as_str());
        }
        debug!(
            subscriber = code.as_str(),
            product = %product.id,
            cards = params.get_all(SMARTCARDS_FIELD).count(),
            "adding order"
        );

        self.call(ADD_FLEXIBLE_ORDER, params)
            .await?
            .ensure_success()?;
        info!(subscriber = code.as_str(), product = %product.id, "order added");
        Ok(())
    }

    /// Terminate an order of a subscriber.
    pub async fn terminate_order(
        &self,
        subscriber: &SubscriberCode,
        order: OrderId,
    ) -> Result<(), PanaccessError> {
        self.order_action(TERMINATE_ORDER, subscriber, order, Params::new())
            .await
    }

    pub(super) async fn order_action(
        &self,
        function: &str,
        subscriber: &SubscriberCode,
        order: OrderId,
        extra: Params,
    ) -> Result<(), PanaccessError> {
        let mut params = Params::new()
            .with(OrderId::FIELD, order.to_string())
            .with(SubscriberCode::FIELD, subscriber.as_str());
        for (key, value) in extra.iter() {
            params.add(key, value);
        }
        self.call(function, params).await?.ensure_success()
    }
}
