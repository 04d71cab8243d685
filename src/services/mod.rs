pub mod itinerary_client;
