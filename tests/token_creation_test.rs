//! Token creation against mocked wallet and chain connection.

mod common;

use common::{fast_config, MockConnection, MockWallet, MOCK_MINT_RENT, MOCK_TX_HASH};
use pumpfun_launcher::config::{LaunchConfigBuilder, MetadataFormat};
use pumpfun_launcher::token::instructions::MINT_TO_TAG;
use pumpfun_launcher::token::metadata::CREATE_METADATA_DISCRIMINATOR;
use pumpfun_launcher::token::pda::derive_bonding_curve_account;
use pumpfun_launcher::token::LaunchStep;
use pumpfun_launcher::types::{
    sol_to_lamports, ASSOCIATED_TOKEN_PROGRAM_ID, TOKEN_PROGRAM_ID, TOTAL_SUPPLY,
};
use pumpfun_launcher::{CancelFlag, CreateTokenParams, LaunchConfig, LaunchError, TokenLauncher};
use std::sync::atomic::Ordering;
use std::sync::Arc;

fn launcher(
    wallet: &Arc<MockWallet>,
    connection: &Arc<MockConnection>,
    config: LaunchConfig,
) -> TokenLauncher {
    TokenLauncher::new(wallet.clone(), connection.clone(), config).expect("valid config")
}

fn test_params(initial_liquidity_sol: f64) -> CreateTokenParams {
    CreateTokenParams::new(
        "Test Token",
        "TEST",
        "https://arweave.net/test-metadata",
        sol_to_lamports(initial_liquidity_sol),
    )
}

#[tokio::test]
async fn test_create_token_with_mocked_collaborators() {
    let wallet = Arc::new(MockWallet::new());
    let connection = Arc::new(MockConnection::new());
    let launcher = launcher(&wallet, &connection, fast_config());

    let result = launcher.create_token(test_params(0.1)).await.unwrap();

    assert_eq!(result.confirmation_handle, MOCK_TX_HASH);
    assert!(result.mint_address.to_string().to_lowercase().ends_with('p'));
    assert_eq!(
        result.bonding_curve_address,
        derive_bonding_curve_account(&result.mint_address).unwrap().address
    );
    assert!(!result.bonding_curve_address.is_on_curve());
    assert_ne!(result.liquidity_pool_address, result.bonding_curve_address);
    assert_eq!(result.decimals, 6);
    assert_eq!(result.total_supply, TOTAL_SUPPLY);
    assert_eq!(result.initial_liquidity_lamports, 100_000_000);

    assert_eq!(connection.rent_calls.load(Ordering::SeqCst), 1);
    assert_eq!(connection.blockhash_calls.load(Ordering::SeqCst), 1);
    assert_eq!(wallet.send_calls().await, 1);
}

#[tokio::test]
async fn test_envelope_is_co_signed_by_mint() {
    let wallet = Arc::new(MockWallet::new());
    let connection = Arc::new(MockConnection::new());
    let launcher = launcher(&wallet, &connection, fast_config());

    let result = launcher.create_token(test_params(0.1)).await.unwrap();

    let sent = wallet.sent.lock().await;
    let envelope = &sent[0];
    assert_eq!(envelope.fee_payer(), wallet.address);
    assert_eq!(envelope.instructions().len(), LaunchStep::ORDER.len());
    assert!(envelope.is_signed_by(&result.mint_address));
    assert!(!envelope.is_signed_by(&wallet.address));

    let create_mint = &envelope.instructions()[LaunchStep::CreateMintAccount.index()];
    assert_eq!(u64::from_le_bytes(create_mint.data[4..12].try_into().unwrap()), MOCK_MINT_RENT);

    let transfer = &envelope.instructions()[LaunchStep::TransferInitialLiquidity.index()];
    assert_eq!(transfer.accounts[1].pubkey, result.bonding_curve_address);
    assert_eq!(u64::from_le_bytes(transfer.data[4..12].try_into().unwrap()), 100_000_000);
}

#[tokio::test]
async fn test_bonding_curve_created_before_minted_to() {
    let wallet = Arc::new(MockWallet::new());
    let connection = Arc::new(MockConnection::new());
    let launcher = launcher(&wallet, &connection, fast_config());

    let result = launcher.create_token(test_params(0.5)).await.unwrap();
    let curve = result.bonding_curve_address;

    let sent = wallet.sent.lock().await;
    let instructions = sent[0].instructions();

    let created_at = instructions
        .iter()
        .position(|ix| ix.program_id == ASSOCIATED_TOKEN_PROGRAM_ID && ix.accounts[1].pubkey == curve)
        .expect("bonding curve account creation");
    let minted_at = instructions
        .iter()
        .position(|ix| {
            ix.program_id == TOKEN_PROGRAM_ID
                && ix.data.first() == Some(&MINT_TO_TAG)
                && ix.accounts[1].pubkey == curve
        })
        .expect("mint to bonding curve");

    assert!(created_at < minted_at);
}

#[tokio::test]
async fn test_liquidity_below_minimum_makes_no_calls() {
    let wallet = Arc::new(MockWallet::new());
    let connection = Arc::new(MockConnection::new());
    let launcher = launcher(&wallet, &connection, fast_config());

    let err = launcher.create_token(test_params(0.05)).await.unwrap_err();

    assert!(matches!(err, LaunchError::InvalidParameters(_)));
    assert_eq!(connection.total_calls(), 0);
    assert_eq!(wallet.balance_calls.load(Ordering::SeqCst), 0);
    assert_eq!(wallet.send_calls().await, 0);
}

#[tokio::test]
async fn test_full_unit_minimum_rejects_test_amounts() {
    let wallet = Arc::new(MockWallet::new());
    let connection = Arc::new(MockConnection::new());
    let config = LaunchConfigBuilder::new()
        .with_vanity_search("p", 1_000_000)
        .with_min_initial_liquidity(sol_to_lamports(1.0))
        .build();
    let launcher = launcher(&wallet, &connection, config);

    let err = launcher.create_token(test_params(0.1)).await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(connection.total_calls(), 0);

    assert!(launcher.create_token(test_params(1.0)).await.is_ok());
}

#[tokio::test]
async fn test_invalid_name_and_symbol_rejected() {
    let wallet = Arc::new(MockWallet::new());
    let connection = Arc::new(MockConnection::new());
    let launcher = launcher(&wallet, &connection, fast_config());

    let empty_name = CreateTokenParams::new("", "TEST", "", sol_to_lamports(0.1));
    assert!(matches!(
        launcher.create_token(empty_name).await,
        Err(LaunchError::InvalidParameters(_))
    ));

    let long_symbol = CreateTokenParams::new("Test", "WAYTOOLONGSYMBOL", "", sol_to_lamports(0.1));
    assert!(matches!(
        launcher.create_token(long_symbol).await,
        Err(LaunchError::InvalidParameters(_))
    ));

    assert_eq!(connection.total_calls(), 0);
    assert_eq!(wallet.send_calls().await, 0);
}

#[tokio::test]
async fn test_rent_query_failure_never_submits() {
    let wallet = Arc::new(MockWallet::new());
    let connection = Arc::new(MockConnection::failing_rent());
    let launcher = launcher(&wallet, &connection, fast_config());

    let err = launcher.create_token(test_params(0.1)).await.unwrap_err();

    match err {
        LaunchError::ChainQueryFailed { step, source } => {
            assert_eq!(step, "rent exemption");
            assert!(source.to_string().contains("connection refused"));
        }
        other => panic!("expected ChainQueryFailed, got {:?}", other),
    }
    assert_eq!(wallet.send_calls().await, 0);
}

#[tokio::test]
async fn test_blockhash_failure_never_submits() {
    let wallet = Arc::new(MockWallet::new());
    let connection = Arc::new(MockConnection::failing_blockhash());
    let launcher = launcher(&wallet, &connection, fast_config());

    let err = launcher.create_token(test_params(0.1)).await.unwrap_err();

    assert!(matches!(err, LaunchError::ChainQueryFailed { step: "latest blockhash", .. }));
    assert_eq!(wallet.send_calls().await, 0);
}

#[tokio::test]
async fn test_rejected_submission_is_not_retried() {
    let wallet = Arc::new(MockWallet::rejecting());
    let connection = Arc::new(MockConnection::new());
    let launcher = launcher(&wallet, &connection, fast_config());

    let err = launcher.create_token(test_params(0.1)).await.unwrap_err();

    assert!(matches!(err, LaunchError::SubmissionRejected { .. }));
    assert!(err.to_string().contains("insufficient lamports"));
    assert_eq!(wallet.send_calls().await, 1);
    assert_eq!(connection.blockhash_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_preflight_balance_check() {
    let wallet = Arc::new(MockWallet::with_balance(50_000_000));
    let connection = Arc::new(MockConnection::new());
    let config = LaunchConfigBuilder::new()
        .with_vanity_search("p", 1_000_000)
        .with_preflight_balance_check(true)
        .build();
    let launcher = launcher(&wallet, &connection, config);

    let err = launcher.create_token(test_params(0.1)).await.unwrap_err();

    match err {
        LaunchError::InsufficientBalance { required, available } => {
            assert_eq!(available, 50_000_000);
            assert!(required > 100_000_000 + MOCK_MINT_RENT);
        }
        other => panic!("expected InsufficientBalance, got {:?}", other),
    }
    assert_eq!(wallet.balance_calls.load(Ordering::SeqCst), 1);
    assert_eq!(wallet.send_calls().await, 0);
}

#[tokio::test]
async fn test_key_search_exhausted_before_chain_queries() {
    let wallet = Arc::new(MockWallet::new());
    let connection = Arc::new(MockConnection::new());
    // Longer than any base58 address, so it can never match.
    let config = LaunchConfigBuilder::new()
        .with_vanity_search("pump".repeat(15), 50)
        .build();
    let launcher = launcher(&wallet, &connection, config);

    let err = launcher.create_token(test_params(0.1)).await.unwrap_err();

    assert!(matches!(err, LaunchError::KeySearchExhausted { attempts: 50 }));
    assert_eq!(connection.total_calls(), 0);
    assert_eq!(wallet.send_calls().await, 0);
}

#[tokio::test]
async fn test_cancelled_launch_makes_no_calls() {
    let wallet = Arc::new(MockWallet::new());
    let connection = Arc::new(MockConnection::new());
    let launcher = launcher(&wallet, &connection, fast_config());

    let cancel = CancelFlag::new();
    cancel.cancel();
    let err = launcher
        .create_token_with_cancel(test_params(0.1), cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, LaunchError::Cancelled { .. }));
    assert_eq!(connection.total_calls(), 0);
    assert_eq!(wallet.send_calls().await, 0);
}

#[tokio::test]
async fn test_json_metadata_format() {
    let wallet = Arc::new(MockWallet::new());
    let connection = Arc::new(MockConnection::new());
    let config = LaunchConfigBuilder::new()
        .with_vanity_search("p", 1_000_000)
        .with_metadata_format(MetadataFormat::Json)
        .build();
    let launcher = launcher(&wallet, &connection, config);

    let prepared = launcher
        .prepare(&test_params(0.1), CancelFlag::new())
        .await
        .unwrap();

    let data = &prepared.envelope.instructions()[LaunchStep::CreateMetadata.index()].data;
    assert_eq!(&data[..8], &CREATE_METADATA_DISCRIMINATOR);
    let len = u32::from_le_bytes(data[8..12].try_into().unwrap()) as usize;
    let json: serde_json::Value = serde_json::from_slice(&data[12..12 + len]).unwrap();
    assert_eq!(json["symbol"], "TEST");
    assert_eq!(prepared.mint_rent_lamports, MOCK_MINT_RENT);
    // prepare never submits
    assert_eq!(wallet.send_calls().await, 0);
}

#[tokio::test]
async fn test_prepared_launch_exposes_only_mint_address() {
    let wallet = Arc::new(MockWallet::new());
    let connection = Arc::new(MockConnection::new());
    let launcher = launcher(&wallet, &connection, fast_config());

    let prepared = launcher
        .prepare(&test_params(0.1), CancelFlag::new())
        .await
        .unwrap();
    let mint = prepared.mint_address();

    assert!(mint.to_string().to_lowercase().ends_with('p'));
    assert!(prepared.mint_attempts() >= 1);
    assert!(prepared.envelope.is_signed_by(&mint));
    assert_eq!(
        prepared.accounts.bonding_curve,
        derive_bonding_curve_account(&mint).unwrap()
    );

    let printed = format!("{:?}", prepared);
    assert!(printed.contains(&mint.to_string()));
    assert!(!printed.contains("secret"));
}

#[tokio::test]
async fn test_bonding_curve_exists_reads_account_info() {
    let wallet = Arc::new(MockWallet::new());
    let connection = Arc::new(MockConnection::new());
    let launcher = launcher(&wallet, &connection, fast_config());

    let result = launcher.create_token(test_params(0.1)).await.unwrap();
    assert!(!launcher.bonding_curve_exists(&result).await.unwrap());

    connection
        .existing_accounts
        .lock()
        .await
        .insert(result.bonding_curve_address);
    assert!(launcher.bonding_curve_exists(&result).await.unwrap());
    assert_eq!(connection.account_calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_invalid_config_rejected_at_construction() {
    let wallet = Arc::new(MockWallet::new());
    let connection = Arc::new(MockConnection::new());
    let config = LaunchConfigBuilder::new().with_vanity_search("0", 10).build();

    let result = TokenLauncher::new(wallet, connection, config);
    assert!(matches!(result, Err(LaunchError::InvalidParameters(_))));
}

// Default "pump" suffix; takes roughly 700k keypairs on average, which is
// minutes in a debug build. Run it with:
//   cargo test --release --test token_creation_test -- --ignored
#[tokio::test]
#[ignore = "slow in debug builds; run with --release -- --ignored"]
async fn test_mint_address_ends_with_pump() {
    let wallet = Arc::new(MockWallet::new());
    let connection = Arc::new(MockConnection::new());
    let launcher = launcher(&wallet, &connection, LaunchConfig::default());

    let result = launcher.create_token(test_params(0.1)).await.unwrap();

    assert!(result.mint_address.to_string().to_lowercase().ends_with("pump"));
    assert_eq!(result.confirmation_handle, MOCK_TX_HASH);
}
