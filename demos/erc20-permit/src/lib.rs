#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]
#![allow(clippy::result_large_err)]
extern crate alloc;

use alloc::{string::String, vec::Vec};

use alloy_primitives::{Address, B256, U256};
use permit_stylus::{
    token::erc20::{
        self,
        extensions::{
            permit, Erc20Metadata, Erc20Permit, IErc20Metadata, IErc20Permit,
        },
        IErc20,
    },
    utils::cryptography::eip712::{Eip712DomainFields, IEip712},
};
use stylus_sdk::{alloy_primitives::U8, msg, prelude::*};

#[entrypoint]
#[storage]
struct Erc20PermitDemo {
    erc20_permit: Erc20Permit<Eip712>,
    metadata: Erc20Metadata,
}

#[storage]
struct Eip712;

impl IEip712 for Eip712 {
    const NAME: &'static str = "template";
    const VERSION: &'static str = "v1.0.0";
}

#[public]
#[implements(IErc20<Error = erc20::Error>, IErc20Metadata, IErc20Permit<Error = permit::Error>)]
impl Erc20PermitDemo {
    /// The token name is the name of the signing domain.
    #[constructor]
    fn constructor(
        &mut self,
        symbol: String,
        initial_supply: U256,
    ) -> Result<(), erc20::Error> {
        self.metadata.constructor(Eip712::NAME.into(), symbol);
        self.erc20_permit.erc20._mint(msg::sender(), initial_supply)
    }

    fn version(&self) -> String {
        Eip712::VERSION.into()
    }

    fn eip712_domain(&self) -> Eip712DomainFields {
        self.erc20_permit.eip712.eip712_domain()
    }
}

#[public]
impl IErc20 for Erc20PermitDemo {
    type Error = erc20::Error;

    fn total_supply(&self) -> U256 {
        self.erc20_permit.erc20.total_supply()
    }

    fn balance_of(&self, account: Address) -> U256 {
        self.erc20_permit.erc20.balance_of(account)
    }

    fn transfer(
        &mut self,
        to: Address,
        value: U256,
    ) -> Result<bool, Self::Error> {
        self.erc20_permit.erc20.transfer(to, value)
    }

    fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.erc20_permit.erc20.allowance(owner, spender)
    }

    fn approve(
        &mut self,
        spender: Address,
        value: U256,
    ) -> Result<bool, Self::Error> {
        self.erc20_permit.erc20.approve(spender, value)
    }

    fn transfer_from(
        &mut self,
        from: Address,
        to: Address,
        value: U256,
    ) -> Result<bool, Self::Error> {
        self.erc20_permit.erc20.transfer_from(from, to, value)
    }
}

#[public]
impl IErc20Metadata for Erc20PermitDemo {
    fn name(&self) -> String {
        self.metadata.name()
    }

    fn symbol(&self) -> String {
        self.metadata.symbol()
    }

    fn decimals(&self) -> U8 {
        self.metadata.decimals()
    }
}

#[public]
impl IErc20Permit for Erc20PermitDemo {
    type Error = permit::Error;

    fn nonces(&self, owner: Address) -> U256 {
        self.erc20_permit.nonces(owner)
    }

    #[selector(name = "DOMAIN_SEPARATOR")]
    fn domain_separator(&self) -> B256 {
        self.erc20_permit.domain_separator()
    }

    fn permit(
        &mut self,
        owner: Address,
        spender: Address,
        value: U256,
        deadline: U256,
        v: u8,
        r: B256,
        s: B256,
    ) -> Result<(), Self::Error> {
        self.erc20_permit.permit(owner, spender, value, deadline, v, r, s)
    }
}
