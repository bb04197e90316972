//! Render timelock payloads for review before they are signed.

use govlock_governance::TimelockCall;
use govlock_types::{CallPayload, Selector};
use govlock_utils::format_delay;

use crate::{OpsError, SignatureBook};

pub struct CallDecoder<'a> {
    book: &'a SignatureBook,
}

impl<'a> CallDecoder<'a> {
    pub fn new(book: &'a SignatureBook) -> Self {
        Self { book }
    }

    /// Decode a payload addressed to the timelock and describe it.
    pub fn render(&self, payload: &CallPayload) -> Result<String, OpsError> {
        let call = TimelockCall::decode(payload)?.ok_or_else(|| OpsError::NotTimelockCall(payload.selector()))?;
        Ok(self.describe(&call))
    }

    pub fn describe(&self, call: &TimelockCall) -> String {
        match call {
            TimelockCall::PrepareCall {
                target,
                payload,
                validate,
            } => format!(
                "prepareCall(\n    target_address={target},\n    target_function={},\n    validate={validate}\n)",
                self.describe_inner(payload)
            ),
            TimelockCall::QuickExecuteCall { target, payload } => format!(
                "quickExecuteCall(\n    target_address={target},\n    target_function={},\n)",
                self.describe_inner(payload)
            ),
            TimelockCall::ExecuteCall { id } => format!("executeCall({id})"),
            TimelockCall::CancelCall { id } => format!("cancelCall({id})"),
            TimelockCall::SetDelay {
                target,
                selector,
                delay_secs,
            }
            | TimelockCall::UpdateDelay {
                target,
                selector,
                delay_secs,
            } => format!(
                "{}(target_address={target}, function={}, delay={})",
                call.name(),
                self.function_name(selector),
                format_delay(*delay_secs)
            ),
            TimelockCall::TestCall { record } => {
                format!("testCall(id={}, target_address={})", record.id(), record.target())
            }
        }
    }

    /// Inner payloads addressed to the timelock are expanded on one line;
    /// anything else shows its signature and raw arguments.
    fn describe_inner(&self, payload: &CallPayload) -> String {
        if let Ok(Some(call)) = TimelockCall::decode(payload) {
            return self.describe(&call).replace("\n    ", " ").replace('\n', "");
        }
        let selector = payload.selector();
        let signature = self.book.lookup(&selector).map_or_else(
            || format!("<unknown {selector}>"),
            str::to_string,
        );
        if payload.args().is_empty() {
            signature
        } else {
            format!("{signature} args=0x{}", hex::encode(payload.args()))
        }
    }

    fn function_name(&self, selector: &Selector) -> String {
        match self.book.lookup(selector) {
            Some(signature) => signature.split('(').next().unwrap_or(signature).to_string(),
            None => selector.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use govlock_types::ContractAddress;

    fn book() -> SignatureBook {
        let mut book = SignatureBook::with_timelock_signatures();
        book.insert("setFee(uint256)");
        book
    }

    #[test]
    fn renders_prepare_call_with_inner_signature() {
        let book = book();
        let inner = CallPayload::encode(Selector::from_signature("setFee(uint256)"), &5u64).unwrap();
        let payload = TimelockCall::PrepareCall {
            target: ContractAddress::repeat(1),
            payload: inner,
            validate: true,
        }
        .encode()
        .unwrap();
        let text = CallDecoder::new(&book).render(&payload).unwrap();
        assert!(text.starts_with("prepareCall(\n"));
        assert!(text.contains(&format!("target_address={}", ContractAddress::repeat(1))));
        assert!(text.contains("target_function=setFee(uint256) args=0x0500000000000000"));
        assert!(text.contains("validate=true"));
    }

    #[test]
    fn renders_set_delay_with_function_name() {
        let book = book();
        let payload = TimelockCall::SetDelay {
            target: ContractAddress::repeat(2),
            selector: Selector::from_signature("setFee(uint256)"),
            delay_secs: 3 * 86_400,
        }
        .encode()
        .unwrap();
        let text = CallDecoder::new(&book).render(&payload).unwrap();
        assert_eq!(
            text,
            format!(
                "setDelay(target_address={}, function=setFee, delay=3d 0h)",
                ContractAddress::repeat(2)
            )
        );
    }

    #[test]
    fn expands_nested_delay_update() {
        let book = book();
        let update = govlock_governance::update_delay_payload(
            ContractAddress::repeat(2),
            Selector::from_signature("setFee(uint256)"),
            86_400,
        )
        .unwrap();
        let payload = TimelockCall::PrepareCall {
            target: ContractAddress::repeat(0x71),
            payload: update,
            validate: true,
        }
        .encode()
        .unwrap();
        let text = CallDecoder::new(&book).render(&payload).unwrap();
        assert!(text.contains("target_function=updateDelay(target_address="));
        assert!(text.contains("function=setFee, delay=1d 0h)"));
    }

    #[test]
    fn unknown_inner_selector_is_marked() {
        let book = book();
        let payload = TimelockCall::QuickExecuteCall {
            target: ContractAddress::repeat(1),
            payload: CallPayload::from_bytes(vec![9, 9, 9, 9]),
        }
        .encode()
        .unwrap();
        let text = CallDecoder::new(&book).render(&payload).unwrap();
        assert!(text.contains("<unknown 0x09090909>"));
    }

    #[test]
    fn rejects_non_timelock_payload() {
        let book = book();
        let payload = CallPayload::encode(Selector::from_signature("setFee(uint256)"), &5u64).unwrap();
        let err = CallDecoder::new(&book).render(&payload).unwrap_err();
        assert!(matches!(err, OpsError::NotTimelockCall(_)));
    }
}
