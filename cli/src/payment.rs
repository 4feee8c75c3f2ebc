//! Payment commands: purchase, authorize, capture, refund and void.

use anyhow::{Context, Result};
use axcess_lib::constants::supports_country;
use axcess_lib::{
    Address, Authorization, CardBrand, CreditCard, CurlTransport, Gateway, GatewayConfig,
    Instrument, Money, Options, Response,
};
use tracing::{debug, warn};

use crate::cli::{AddressArgs, CardArgs, ChargeArgs, Cli, Commands, FollowUpArgs, OptionArgs};
use crate::colors::Colors;
use crate::config_utils::load_config;
use crate::exit_codes::ExitCode;
use crate::output::handle_response;

/// Run one payment command and print the processor's answer.
///
/// A declined transaction is printed like an approved one and then ends
/// the process with [`ExitCode::PaymentDeclined`].
pub fn payment_command(cli: &Cli, command: &Commands) -> Result<()> {
    let config = load_config(cli)?;
    if !config.test && cli.should_show_output() {
        eprintln!("{}", Colors::warning("Sending a LIVE transaction"));
    }

    let (operation, response) = match command {
        Commands::Purchase(args) => ("purchase", charge(cli, &config, args, Charge::Purchase)?),
        Commands::Authorize(args) => ("authorize", charge(cli, &config, args, Charge::Authorize)?),
        Commands::Capture(args) => ("capture", follow_up(cli, &config, args, FollowUp::Capture)?),
        Commands::Refund(args) => ("refund", follow_up(cli, &config, args, FollowUp::Refund)?),
        Commands::Void { reference, options } => {
            let options = build_options(options, None);
            let gateway = build_gateway(cli, config)?;
            ("void", gateway.void(&Authorization::new(reference.as_str()), &options)?)
        }
        _ => unreachable!("not a payment command"),
    };

    handle_response(cli, operation, &response)?;

    match ExitCode::from(&response) {
        ExitCode::Success => Ok(()),
        declined => declined.exit(),
    }
}

#[derive(Clone, Copy)]
enum Charge {
    Purchase,
    Authorize,
}

#[derive(Clone, Copy)]
enum FollowUp {
    Capture,
    Refund,
}

fn charge(cli: &Cli, config: &GatewayConfig, args: &ChargeArgs, kind: Charge) -> Result<Response> {
    let money = parse_money(config, &args.amount, &args.options)?;
    let instrument = match &args.reference {
        Some(reference) => Instrument::Reference(Authorization::new(reference.as_str())),
        None => Instrument::Card(build_card(&args.card)?),
    };
    let options = build_options(&args.options, build_address(&args.address));

    let gateway = build_gateway(cli, config.clone())?;
    let response = match kind {
        Charge::Purchase => gateway.purchase(money, &instrument, &options)?,
        Charge::Authorize => gateway.authorize(money, &instrument, &options)?,
    };
    Ok(response)
}

fn follow_up(
    cli: &Cli,
    config: &GatewayConfig,
    args: &FollowUpArgs,
    kind: FollowUp,
) -> Result<Response> {
    let money = args
        .amount
        .as_deref()
        .map(|amount| parse_money(config, amount, &args.options))
        .transpose()?;
    let authorization = Authorization::new(args.reference.as_str());
    let options = build_options(&args.options, None);

    let gateway = build_gateway(cli, config.clone())?;
    let response = match kind {
        FollowUp::Capture => gateway.capture(money, &authorization, &options)?,
        FollowUp::Refund => gateway.refund(money, &authorization, &options)?,
    };
    Ok(response)
}

fn build_gateway(cli: &Cli, config: GatewayConfig) -> Result<Gateway> {
    debug!(endpoint = config.endpoint(), "Using gateway endpoint");
    let transport = CurlTransport::from(&config).verbose(cli.verbosity >= 3);
    Ok(Gateway::with_transport(config, transport)?)
}

/// Parse a major-unit amount in the currency the request will carry
fn parse_money(config: &GatewayConfig, amount: &str, options: &OptionArgs) -> Result<Money> {
    let currency = options
        .currency
        .as_deref()
        .unwrap_or(&config.default_currency);
    Ok(Money::parse(amount, currency)?)
}

fn build_card(args: &CardArgs) -> Result<CreditCard> {
    // clap enforces these unless --reference is present
    let missing = |flag: &str| format!("--{flag} is required for card payments");

    let brand: CardBrand = args.brand.parse()?;
    Ok(CreditCard {
        first_name: args.first_name.clone().with_context(|| missing("first-name"))?,
        last_name: args.last_name.clone().with_context(|| missing("last-name"))?,
        number: args.number.clone().with_context(|| missing("number"))?,
        brand,
        month: args.month.with_context(|| missing("month"))?,
        year: args.year.with_context(|| missing("year"))?,
        verification_value: args.cvv.clone(),
    })
}

fn build_address(args: &AddressArgs) -> Option<Address> {
    let address = Address {
        address1: args.address1.clone(),
        address2: args.address2.clone(),
        zip: args.zip.clone(),
        city: args.city.clone(),
        state: args.state.clone(),
        country: args.country.clone(),
        company: args.company.clone(),
        phone: args.phone.clone(),
        mobile: args.mobile.clone(),
    };

    if let Some(country) = &address.country {
        if !supports_country(country) {
            warn!(country = %country, "Country is not on the processor's supported list");
        }
    }

    (address != Address::default()).then_some(address)
}

fn build_options(args: &OptionArgs, billing_address: Option<Address>) -> Options {
    Options {
        currency: args.currency.clone(),
        order_id: args.order_id.clone(),
        transaction_id: args.transaction_id.clone(),
        customer_id: args.customer_id.clone(),
        bulk_id: args.bulk_id.clone(),
        soft_descriptor: args.soft_descriptor.clone(),
        email: args.email.clone(),
        ip: args.ip.clone(),
        description: args.description.clone(),
        billing_address,
        transaction_mode: args.transaction_mode.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GatewayConfig {
        GatewayConfig::builder()
            .credentials("s", "l", "p", "c")
            .default_currency("JPY")
            .build()
            .unwrap()
    }

    #[test]
    fn test_parse_money_uses_option_then_default_currency() {
        let config = config();

        let money = parse_money(&config, "500", &OptionArgs::default()).unwrap();
        assert_eq!(money, Money::with_currency(500, "JPY"));

        let options = OptionArgs {
            currency: Some("usd".into()),
            ..Default::default()
        };
        let money = parse_money(&config, "5.25", &options).unwrap();
        assert_eq!(money, Money::with_currency(525, "USD"));

        assert!(parse_money(&config, "5.25", &OptionArgs::default()).is_err());
    }

    #[test]
    fn test_build_card() {
        let args = CardArgs {
            number: Some("4200000000000000".into()),
            first_name: Some("Longbob".into()),
            last_name: Some("Longsen".into()),
            month: Some(5),
            year: Some(2030),
            brand: "mastercard".into(),
            cvv: None,
        };
        let card = build_card(&args).unwrap();
        assert_eq!(card.brand, CardBrand::Master);
        assert_eq!(card.holder_name(), "Longbob Longsen");

        let args = CardArgs {
            brand: "diners".into(),
            ..args
        };
        assert!(build_card(&args).is_err());
    }

    #[test]
    fn test_empty_address_is_none() {
        assert!(build_address(&AddressArgs::default()).is_none());
        let args = AddressArgs {
            city: Some("Munich".into()),
            ..Default::default()
        };
        assert_eq!(
            build_address(&args).and_then(|a| a.city),
            Some("Munich".to_string())
        );
    }

    #[test]
    fn test_build_options_copies_fields() {
        let args = OptionArgs {
            order_id: Some("o-1".into()),
            description: Some("memo".into()),
            ..Default::default()
        };
        let options = build_options(&args, None);
        assert_eq!(options.order_id.as_deref(), Some("o-1"));
        assert_eq!(options.description.as_deref(), Some("memo"));
        assert!(options.billing_address.is_none());
    }
}
