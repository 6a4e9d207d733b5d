use anchor_lang::prelude::*;

// 8 discriminator, 32 pubkey, 1 bump
pub const TREASURY_ACCOUNT_SIZE: usize = 8 + 32 + 1;

/// Program-owned account holding every entry fee until the next payout.
#[account]
pub struct Treasury {
    pub raffle: Pubkey,
    pub bump: u8,
}

impl Treasury {
    /// Lamports that can be paid out without dropping below rent exemption.
    pub fn prize_pool(lamports: u64, rent: &Rent) -> u64 {
        lamports.saturating_sub(rent.minimum_balance(TREASURY_ACCOUNT_SIZE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prize_pool_excludes_rent() {
        let rent = Rent::default();
        let reserve = rent.minimum_balance(TREASURY_ACCOUNT_SIZE);

        assert_eq!(Treasury::prize_pool(reserve, &rent), 0);
        assert_eq!(Treasury::prize_pool(reserve + 300, &rent), 300);
        assert_eq!(Treasury::prize_pool(reserve - 1, &rent), 0);
    }
}
