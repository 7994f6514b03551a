#[derive(Clone, PartialEq, Eq, Debug)]
pub enum FluidPacket<C> {
    Empty,
    Fluid { color: C },
}
impl<C> FluidPacket<C> {
    pub fn new(color: C) -> Self {
        FluidPacket::Fluid { color }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FluidPacket::Empty)
    }

    pub fn get_color(&self) -> Option<&C> {
        match self {
            FluidPacket::Fluid { color } => Some(color),
            FluidPacket::Empty => None,
        }
    }
}
impl<C: AsRef<str>> FluidPacket<C> {
    pub fn get_text_representation(&self) -> String {
        match self.get_color() {
            Some(color) => color.as_ref().to_string(),
            None => ".".to_string(),
        }
    }
}

/// A tube. Slot 0 is the bottom level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FluidContainer<C> {
    packets: Vec<FluidPacket<C>>,
    capacity: usize,
}
impl<C: Clone> FluidContainer<C> {
    pub fn new(capacity: usize) -> Self {
        Self {
            packets: vec![FluidPacket::Empty; capacity],
            capacity,
        }
    }

    /// Writes the packet into the lowest empty slot. Returns false when full.
    pub fn add_fluid(&mut self, packet: FluidPacket<C>) -> bool {
        for p in &mut self.packets {
            if p.is_empty() {
                *p = packet;
                return true;
            }
        }
        false
    }
}
impl<C> FluidContainer<C> {
    pub fn is_full(&self) -> bool {
        self.packets.iter().all(|p| !p.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.packets.iter().all(|p| p.is_empty())
    }

    pub fn get_empty_space(&self) -> usize {
        self.packets.iter().filter(|p| p.is_empty()).count()
    }

    pub fn get_capacity(&self) -> usize {
        self.capacity
    }

    pub fn get_filled_amount(&self) -> usize {
        self.get_capacity() - self.get_empty_space()
    }

    pub fn get_packets(&self) -> &Vec<FluidPacket<C>> {
        &self.packets
    }
}
impl<C: PartialEq> FluidContainer<C> {
    /// True when every slot holds `color`.
    pub fn is_filled_with(&self, color: &C) -> bool {
        self.packets.iter().all(|p| p.get_color() == Some(color))
    }
}
impl<C: AsRef<str>> FluidContainer<C> {
    pub fn get_text_representation(&self) -> String {
        self.packets
            .iter()
            .map(FluidPacket::get_text_representation)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// The tube grid at one point of a fill run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FillState<C> {
    pub fluid_containers: Vec<FluidContainer<C>>,
}
impl<C: Clone> FillState<C> {
    pub fn new(tube_count: usize, capacity: usize) -> Self {
        Self {
            fluid_containers: vec![FluidContainer::new(capacity); tube_count],
        }
    }
}
impl<C> FillState<C> {
    pub fn is_complete(&self) -> bool {
        self.fluid_containers.iter().all(FluidContainer::is_full)
    }

    pub fn get_filled_amounts(&self) -> Vec<usize> {
        self.fluid_containers
            .iter()
            .map(FluidContainer::get_filled_amount)
            .collect()
    }
}
impl<C: AsRef<str>> FillState<C> {
    pub fn get_text_representation(&self) -> String {
        self.fluid_containers
            .iter()
            .map(FluidContainer::get_text_representation)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_fluid_fills_bottom_up_until_full() {
        let mut tube: FluidContainer<&str> = FluidContainer::new(2);
        assert!(tube.is_empty());
        assert!(tube.add_fluid(FluidPacket::new("red")));
        assert_eq!(tube.get_packets()[0], FluidPacket::new("red"));
        assert!(tube.get_packets()[1].is_empty());
        assert!(tube.add_fluid(FluidPacket::new("red")));
        assert!(tube.is_full());
        assert!(!tube.add_fluid(FluidPacket::new("red")));
        assert_eq!(tube.get_filled_amount(), 2);
    }

    #[test]
    fn text_representation_marks_empty_slots() {
        let mut state: FillState<String> = FillState::new(2, 3);
        state.fluid_containers[1].add_fluid(FluidPacket::new("blue".to_string()));
        assert_eq!(state.get_text_representation(), ".,.,.\nblue,.,.");
    }

    #[test]
    fn zero_tube_grid_is_trivially_complete() {
        let state: FillState<String> = FillState::new(0, 4);
        assert!(state.is_complete());
        assert!(state.get_filled_amounts().is_empty());
    }

    #[test]
    fn is_filled_with_requires_every_slot() {
        let mut tube = FluidContainer::new(2);
        tube.add_fluid(FluidPacket::new("green"));
        assert!(!tube.is_filled_with(&"green"));
        tube.add_fluid(FluidPacket::new("green"));
        assert!(tube.is_filled_with(&"green"));
        assert!(!tube.is_filled_with(&"red"));
    }
}
