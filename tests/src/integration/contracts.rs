//! # Contract Sandbox Flows
//!
//! Contract lifecycle through the runtime context: register from raw
//! source, deploy once, execute, and confirm the error paths.

#[cfg(test)]
mod tests {
    use crate::integration::support::seeded_context;
    use ec_02_contracts::ContractError;
    use node_runtime::api::{ExecuteContractRequest, JoinNodeRequest, SubmitTransactionRequest};
    use serde_json::json;

    const TOKEN_SOURCE: &str = r#"
        contract Token {
            function transfer(address to, uint256 amount) public payable {
                balances[to] += amount;
            }
            function balanceOf(address owner) public view returns (uint256) {}
            function approve(address spender, uint256 amount) public {}
        }
    "#;

    #[tokio::test]
    async fn test_register_deploy_execute() {
        let ctx = seeded_context(10);
        let id = ctx.register_contract(TOKEN_SOURCE.into(), "alice".into());

        let contract = ctx.contracts().get(&id).unwrap();
        assert_eq!(contract.ast.functions.len(), 3);
        assert!(!contract.is_deployed());

        let address = ctx.deploy_contract(id, "alice".into()).unwrap();
        assert!(address.starts_with("0x"));

        let result = ctx.execute_contract(ExecuteContractRequest {
            address: address.clone(),
            function_name: "transfer".into(),
            args: vec![json!("bob"), json!(12.5)],
            sender: "alice".into(),
        });
        assert!(result.success);
        assert_eq!(result.events.len(), 1);
        assert!(result.gas_used >= 21_000);
    }

    #[tokio::test]
    async fn test_double_deploy_rejected() {
        let ctx = seeded_context(11);
        let id = ctx.register_contract(TOKEN_SOURCE.into(), "alice".into());
        let address = ctx.deploy_contract(id, "alice".into()).unwrap();

        let err = ctx.deploy_contract(id, "alice".into()).unwrap_err();
        assert_eq!(err, ContractError::AlreadyDeployed { id, address });
    }

    #[tokio::test]
    async fn test_execute_before_deploy_fails() {
        let ctx = seeded_context(12);
        // Registered but never deployed: no address exists for it
        let _id = ctx.register_contract(TOKEN_SOURCE.into(), "alice".into());

        let result = ctx.execute_contract(ExecuteContractRequest {
            address: "0x0000000000000000000000000000000000000000".into(),
            function_name: "transfer".into(),
            args: vec![],
            sender: "alice".into(),
        });
        assert!(!result.success);
        assert!(result.error.unwrap().contains("no deployed contract"));
    }

    #[tokio::test]
    async fn test_deployment_records_chain_head() {
        let ctx = seeded_context(13);
        ctx.join_node(JoinNodeRequest {
            node_id: "n1".into(),
            stake_amount: 1,
            metadata: None,
        })
        .unwrap();

        // Grow the chain before deploying
        ctx.produce_block().await.unwrap();
        ctx.produce_block().await.unwrap();

        let id = ctx.register_contract(TOKEN_SOURCE.into(), "alice".into());
        ctx.deploy_contract(id, "alice".into()).unwrap();

        let contract = ctx.contracts().get(&id).unwrap();
        match contract.deployment {
            ec_02_contracts::DeploymentState::Deployed { block_index, .. } => {
                assert_eq!(block_index, 2);
            }
            ec_02_contracts::DeploymentState::Undeployed => panic!("deploy must have recorded"),
        }
    }

    #[tokio::test]
    async fn test_transfer_to_contract_address_confirms_on_chain() {
        let ctx = seeded_context(14);
        ctx.join_node(JoinNodeRequest {
            node_id: "n1".into(),
            stake_amount: 1,
            metadata: None,
        })
        .unwrap();

        let id = ctx.register_contract(TOKEN_SOURCE.into(), "alice".into());
        let address = ctx.deploy_contract(id, "alice".into()).unwrap();

        let response = ctx
            .submit_transaction(SubmitTransactionRequest {
                from: "alice".into(),
                to: address.clone(),
                amount: 25.0,
                fee: 0.0,
            })
            .await;
        assert!(response.accepted);

        ctx.produce_block().await.unwrap();
        assert_eq!(ctx.balance(&address), 1_025.0);
        assert_eq!(ctx.transaction_history(&address).len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_source_still_registers() {
        let ctx = seeded_context(15);
        let id = ctx.register_contract("；broken𝄞source %%".into(), "alice".into());
        let contract = ctx.contracts().get(&id).unwrap();
        assert!(contract.ast.functions.is_empty());

        // It can even deploy; only execution of unknown functions fails
        let address = ctx.deploy_contract(id, "alice".into()).unwrap();
        let result = ctx.execute_contract(ExecuteContractRequest {
            address,
            function_name: "anything".into(),
            args: vec![],
            sender: "alice".into(),
        });
        assert!(!result.success);
    }
}
