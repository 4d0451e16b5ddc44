use super::{PanaccessClient, PanaccessError};
use crate::domain::{
    GroupOp, Order, OrderId, Params, Rule, Smartcard, Subscriber, SubscriberCode,
};

const LIST_SUBSCRIBERS: &str = "getListOfExtendedSubscribers";
const SUBSCRIBER_EXISTS: &str = "subscriberExists";
const SUBSCRIBER_ORDERS: &str = "getOrdersOfSubscriber";
const DISABLE_ORDER: &str = "disableOrderOfSubscriber";
const ENABLE_ORDER: &str = "enableOrderOfSubscriber";

impl PanaccessClient {
    /// List subscribers with extended fields. `limit` defaults to 1000.
    pub async fn list_subscribers(&self, params: Params) -> Result<Vec<Subscriber>, PanaccessError> {
        self.call(LIST_SUBSCRIBERS, params.with_default_limit())
            .await?
            .decode_with(crate::transport::decode_subscriber_list)
    }

    /// List subscribers matching `rules`. `limit` defaults to 1000.
    pub async fn list_subscribers_filtered(
        &self,
        params: Params,
        group_op: GroupOp,
        rules: Vec<Rule>,
    ) -> Result<Vec<Subscriber>, PanaccessError> {
        self.call_with_filters(LIST_SUBSCRIBERS, params.with_default_limit(), group_op, rules)
            .await?
            .decode_with(crate::transport::decode_subscriber_list)
    }

    pub async fn subscriber_exists(&self, code: &SubscriberCode) -> Result<bool, PanaccessError> {
        let params = Params::new().with(SubscriberCode::FIELD, code.as_str());
        self.call(SUBSCRIBER_EXISTS, params).await?.decode_answer()
    }

    /// Smartcards assigned to a subscriber.
    pub async fn subscriber_smartcards(
        &self,
        code: &SubscriberCode,
    ) -> Result<Vec<Smartcard>, PanaccessError> {
        self.subscriber_smartcards_filtered(code, Vec::new()).await
    }

    /// Smartcards assigned to a subscriber that also match `rules`.
    pub async fn subscriber_smartcards_filtered(
        &self,
        code: &SubscriberCode,
        mut rules: Vec<Rule>,
    ) -> Result<Vec<Smartcard>, PanaccessError> {
        rules.push(Rule::contains(SubscriberCode::FIELD, code.as_str()));
        self.list_smartcards_filtered(Params::new(), GroupOp::And, rules)
            .await
    }

    /// Orders of a subscriber. `limit` defaults to 1000.
    pub async fn subscriber_orders(
        &self,
        code: &SubscriberCode,
        mut params: Params,
    ) -> Result<Vec<Order>, PanaccessError> {
        params.set(SubscriberCode::FIELD, code.as_str());
        self.call(SUBSCRIBER_ORDERS, params.with_default_limit())
            .await?
            .decode_with(crate::transport::decode_order_array)
    }

    /// Suspend an order without terminating it.
    pub async fn disable_order(
        &self,
        code: &SubscriberCode,
        order: OrderId,
    ) -> Result<(), PanaccessError> {
        self.order_action(DISABLE_ORDER, code, order, Params::new())
            .await
    }

    /// Resume a suspended order with no end date.
    pub async fn enable_order(
        &self,
        code: &SubscriberCode,
        order: OrderId,
    ) -> Result<(), PanaccessError> {
        self.order_action(ENABLE_ORDER, code, order, Params::new().with("until", ""))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;
    use crate::domain::FilterOp;

    fn code() -> SubscriberCode {
        SubscriberCode::new("SUB-1").unwrap()
    }

    #[tokio::test]
    async fn list_subscribers_uses_extended_listing() {
        let transport = ScriptedTransport::new().reply(ok(
            r#"{"count": 1, "extendedSubscriberEntries": [{"subscriberCode": "SUB-1"}]}"#,
        ));
        let client = make_client(&[SERVER_A], transport.clone());

        let subscribers = client.list_subscribers(Params::new()).await.unwrap();

        assert_eq!(subscribers[0].code, code());
        assert_eq!(transport.functions(), vec!["getListOfExtendedSubscribers"]);
        assert_param(&transport.requests()[0].params, "limit", "1000");
    }

    #[tokio::test]
    async fn subscriber_smartcards_filtered_appends_subscriber_rule() {
        let transport = ScriptedTransport::new().reply(ok(r#"{"smartcardEntries": []}"#));
        let client = make_client(&[SERVER_A], transport.clone());

        client
            .subscriber_smartcards_filtered(
                &code(),
                vec![Rule::new("disabled", FilterOp::Equal, "0")],
            )
            .await
            .unwrap();

        assert_param(
            &transport.requests()[0].params,
            "filters",
            r#"{"groupOp":"AND","rules":[{"field":"disabled","op":"eq","data":"0"},{"field":"subscriberCode","op":"cn","data":"SUB-1"}]}"#,
        );
    }

    #[tokio::test]
    async fn subscriber_orders_sets_code_and_limit() {
        let transport =
            ScriptedTransport::new().reply(ok(r#"[{"orderId": 1}, {"orderId": 2}]"#));
        let client = make_client(&[SERVER_A], transport.clone());

        let orders = client
            .subscriber_orders(&code(), Params::new().with("subscriberCode", "OTHER"))
            .await
            .unwrap();

        assert_eq!(orders.len(), 2);
        let params = &transport.requests()[0].params;
        assert_param(params, "subscriberCode", "SUB-1");
        assert_no_param_value(params, "subscriberCode", "OTHER");
        assert_param(params, "limit", "1000");
    }

    #[tokio::test]
    async fn enable_order_sends_empty_until() {
        let transport = ScriptedTransport::new().reply(ok("true"));
        let client = make_client(&[SERVER_A], transport.clone());

        client.enable_order(&code(), OrderId::new(3)).await.unwrap();

        assert_eq!(transport.functions(), vec!["enableOrderOfSubscriber"]);
        let params = &transport.requests()[0].params;
        assert_param(params, "orderId", "3");
        assert_param(params, "subscriberCode", "SUB-1");
        assert_param(params, "until", "");
    }

    #[tokio::test]
    async fn disable_order_surfaces_rejection() {
        let transport = ScriptedTransport::new()
            .reply(failed("order_not_found"))
            .reply(ok("true"));
        let client = make_client(&[SERVER_A], transport.clone());
        client.restore_session(crate::domain::SessionId::new("sess-1").unwrap());

        let err = client
            .disable_order(&code(), OrderId::new(3))
            .await
            .unwrap_err();

        assert_eq!(err.api_code(), Some("order_not_found"));
        assert_eq!(
            transport.functions(),
            vec!["disableOrderOfSubscriber", "loggedIn"]
        );
    }

    fn assert_no_param_value(params: &[(String, String)], key: &str, value: &str) {
        assert!(
            !params.iter().any(|(k, v)| k == key && v == value),
            "unexpected param {key}={value}; got: {params:?}"
        );
    }
}
