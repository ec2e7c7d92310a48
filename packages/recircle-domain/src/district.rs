/// Derives a district from a free-text address without consulting the model.
///
/// Addresses are usually written "street, area, district, state" or
/// "street, district", so the second-to-last comma segment is the best
/// guess. A single-segment address is returned whole.
pub fn fallback_district(address: &str) -> String {
	let segments = address.split(',').collect::<Vec<_>>();
	let segment = if segments.len() >= 2 {
		segments[segments.len() - 2]
	} else {
		segments[segments.len() - 1]
	};

	segment.trim().to_string()
}
