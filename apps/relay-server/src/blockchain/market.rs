// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! ABI bindings for the Loanad lending market contract.

use alloy::sol;

// Only the functions the relay calls. Signatures must match the deployed
// contract exactly, including parameter order.
sol! {
    #[sol(rpc)]
    interface ILoanadLendingMarket {
        function getVerifiedUser(address user) external view returns (bool);
        function assignMaximumAmountForLoan(address user) external;
        function verifyUser(address user) external;
        function getMaximumAmountForLoan(address user) external view returns (uint256);
        function getTotalLoans() external view returns (uint256);
        function getActiveLoanIds() external view returns (uint256[] memory);
        function getLoanBorrower(uint256 loanId) external view returns (address);
        function getLoanCollateral(uint256 loanId) external view returns (uint256);
        function addCollateralForCrowfundedLoan(uint256 loanId) external payable;
        function withdrawForCrowfundedLoan(uint256 amount, uint256 loanId) external;
        function borrowMON(uint256 amount) external;
        function s_debtorBorrowed(address debtor) external view returns (uint256);
        function repayMON() external payable;
    }
}
