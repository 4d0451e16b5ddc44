use super::{PanaccessClient, PanaccessError};
use crate::domain::{GroupOp, Params, Rule, Smartcard, SmartcardSn};

const LIST_SMARTCARDS: &str = "getListOfSmartcards";
const LIST_UNUSED_SMARTCARDS: &str = "getUnusedSmartcards";
const ENABLE_SMARTCARD: &str = "enableSmartcard";
const DISABLE_SMARTCARD: &str = "disableSmartcard";

impl PanaccessClient {
    /// List smartcards. `limit` defaults to 1000.
    pub async fn list_smartcards(&self, params: Params) -> Result<Vec<Smartcard>, PanaccessError> {
        self.call(LIST_SMARTCARDS, params.with_default_limit())
            .await?
            .decode_with(crate::transport::decode_smartcard_list)
    }

    /// List smartcards matching `rules`. `limit` defaults to 1000.
    pub async fn list_smartcards_filtered(
        &self,
        params: Params,
        group_op: GroupOp,
        rules: Vec<Rule>,
    ) -> Result<Vec<Smartcard>, PanaccessError> {
        self.call_with_filters(LIST_SMARTCARDS, params.with_default_limit(), group_op, rules)
            .await?
            .decode_with(crate::transport::decode_smartcard_list)
    }

    /// List smartcards not assigned to any subscriber.
    pub async fn list_unused_smartcards(
        &self,
        params: Params,
    ) -> Result<Vec<Smartcard>, PanaccessError> {
        self.call(LIST_UNUSED_SMARTCARDS, params.with_default_limit())
            .await?
            .decode_with(crate::transport::decode_smartcard_array)
    }

    /// Re-enable a disabled smartcard.
    pub async fn enable_smartcard(&self, sn: &SmartcardSn) -> Result<(), PanaccessError> {
        self.smartcard_action(ENABLE_SMARTCARD, sn).await
    }

    /// Disable a smartcard; it stops decrypting until enabled again.
    pub async fn disable_smartcard(&self, sn: &SmartcardSn) -> Result<(), PanaccessError> {
        self.smartcard_action(DISABLE_SMARTCARD, sn).await
    }

    async fn smartcard_action(
        &self,
        function: &str,
        sn: &SmartcardSn,
    ) -> Result<(), PanaccessError> {
        let params = Params::new().with(SmartcardSn::FIELD, sn.as_str());
        self.call(function, params).await?.ensure_success()
    }
}
