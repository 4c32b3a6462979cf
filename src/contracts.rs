//! Static metadata for the deployed Raindrop contract and the ERC-20 subset
//! the client touches. The ABI here mirrors the deployed artifact; the
//! ownership/fee-admin functions are read-only surface the client renders
//! nothing for but keeps for completeness of the binding.

use alloy::primitives::{address, Address};
use alloy::sol;

pub const RAINDROP_ADDRESS: Address = address!("c2C674EA471aC90b0e38e0B142f72f6b3a6223c3");

sol! {
    #[sol(rpc)]
    interface IRaindrop {
        error AlreadyCancelled();
        error AlreadyExecuted();
        error AlreadyExists(string raindropId);
        error ExecutionFailed(string reason);
        error InvalidConfiguration(string reason);
        error InvalidInput(string reason);
        error NotAuthorized();
        error NotFound(string raindropId);

        event RaindropCreated(
            string indexed raindropId,
            address indexed host,
            address indexed token,
            uint256 totalAmount,
            uint256 scheduledTime
        );
        event RaindropExecuted(string indexed raindropId, uint256 participantCount, uint256 amountPerParticipant);
        event RaindropCancelled(string indexed raindropId, address indexed host, uint256 refundAmount);
        event ParticipantsAdded(string indexed raindropId, uint256 count);
        event ParticipantsRemoved(string indexed raindropId, uint256 count);
        event ParticipantsCleared(string indexed raindropId);

        function MAX_PARTICIPANTS() external view returns (uint256);
        function MIN_AMOUNT_PER_PARTICIPANT() external view returns (uint256);

        function createRaindrop(string raindropId, address token, uint256 totalAmount, uint256 scheduledTime) external;
        function addParticipants(string raindropId, address[] newParticipants) external;
        function removeParticipants(string raindropId, address[] participantsToRemove) external;
        function clearParticipants(string raindropId) external;
        function executeRaindrop(string raindropId) external;
        function cancelRaindrop(string raindropId) external;

        function getRaindropDetails(string raindropId)
            external
            view
            returns (
                address host,
                address token,
                uint256 totalAmount,
                uint256 scheduledTime,
                bool executed,
                bool cancelled,
                uint256 participantCount
            );
        function getParticipantsPaginated(string raindropId, uint256 cursor, uint256 size)
            external
            view
            returns (address[] page);

        function owner() external view returns (address);
        function feeRecipient() external view returns (address);
        function platformFeeBps() external view returns (uint256);
    }

    #[sol(rpc)]
    interface IERC20 {
        function approve(address spender, uint256 value) external returns (bool);
        function balanceOf(address owner) external view returns (uint256);
        function decimals() external view returns (uint8);
    }
}
