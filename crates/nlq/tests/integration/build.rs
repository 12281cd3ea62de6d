//! Message construction tests.

use nlq::Result;
use nlq::netlink::attr::nla_align;
use nlq::netlink::{
    BuildOptions, MessageBuilder, NLA_F_NESTED, NLA_HDRLEN, NLM_F_ACK, NLM_F_CREATE, NLM_F_EXCL,
    NLM_F_REQUEST, NLMSG_HDRLEN, NlAttr, NlMsgHdr, NlMsgType, Padding, Sequencer,
};

use crate::common::attrs;

#[test]
fn test_length_patch_matches_content() -> Result<()> {
    let seq = Sequencer::new();
    let mut msg = MessageBuilder::with_sequencer(
        &seq,
        NlMsgType::RTM_NEWLINK,
        NLM_F_REQUEST | NLM_F_CREATE | NLM_F_EXCL,
        0,
        4242,
    )?;
    msg.append_attr_str(3, "dummy0")?; // 4 + 7
    msg.append_attr_u32(4, 1500)?; // 4 + 4
    msg.append_attr_empty(5)?; // 4
    let msg = msg.finish()?;

    let payload = 11 + 8 + 4;
    assert_eq!(msg.len(), NLMSG_HDRLEN + payload);

    let header = NlMsgHdr::from_bytes(msg.as_bytes())?;
    assert_eq!(header.nlmsg_len as usize, NLMSG_HDRLEN + payload);
    assert_eq!(header.nlmsg_type, NlMsgType::RTM_NEWLINK);
    assert_eq!(header.nlmsg_flags, NLM_F_REQUEST | NLM_F_CREATE | NLM_F_EXCL);
    assert_eq!(header.nlmsg_seq, 1);
    assert_eq!(header.nlmsg_pid, 4242);
    assert_eq!(header.payload_len(), payload);
    Ok(())
}

#[test]
fn test_header_only_message() -> Result<()> {
    let msg = MessageBuilder::new(NlMsgType::RTM_GETLINK, NLM_F_REQUEST, 0, 0)?.finish()?;
    assert_eq!(msg.len(), NLMSG_HDRLEN);
    assert_eq!(msg.header().map(|h| h.nlmsg_len), Some(NLMSG_HDRLEN as u32));
    assert!(msg.payload().is_empty());
    Ok(())
}

#[test]
fn test_sequence_numbers() -> Result<()> {
    let seq = Sequencer::new();
    let first = MessageBuilder::with_sequencer(&seq, 16, NLM_F_REQUEST, 0, 0)?.finish()?;
    let second =
        MessageBuilder::with_sequencer(&seq, 16, NLM_F_REQUEST | NLM_F_ACK, 0, 0)?.finish()?;
    let (a, b) = (first.seq().unwrap(), second.seq().unwrap());
    assert_ne!(a, b);
    assert!(b > a);

    for flags in [0, NLM_F_REQUEST, NLM_F_REQUEST | NLM_F_ACK] {
        let msg = MessageBuilder::with_sequencer(&seq, 16, flags, 0xdead, 0)?.finish()?;
        assert_eq!(msg.seq(), Some(0xdead));
    }

    // independent contexts number independently
    let other = Sequencer::new();
    let msg = MessageBuilder::with_sequencer(&other, 16, NLM_F_REQUEST, 0, 0)?.finish()?;
    assert_eq!(msg.seq(), Some(1));
    Ok(())
}

#[test]
fn test_nested_embedding() -> Result<()> {
    let mut info = MessageBuilder::attributes()?;
    info.append_attr_str(1, "vlan")?;

    let mut data = MessageBuilder::attributes()?;
    data.append_attr_u16(1, 100)?;
    info.append_nested(2 | NLA_F_NESTED, data)?;

    let info_bytes = info.as_bytes().to_vec();
    let q = info_bytes.len();

    let mut msg = MessageBuilder::new(NlMsgType::RTM_NEWLINK, NLM_F_REQUEST, 0, 0)?;
    msg.append_attr_u32(5, 1500)?;
    msg.append_nested(18 | NLA_F_NESTED, info)?;
    let msg = msg.finish()?;

    let records = attrs(msg.payload());
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].0, 18 | NLA_F_NESTED);
    assert_eq!(records[1].1, info_bytes);
    assert_eq!(msg.len(), NLMSG_HDRLEN + (NLA_HDRLEN + 4) + (NLA_HDRLEN + q));

    let inner = attrs(&records[1].1);
    assert_eq!(inner[0], (1, b"vlan\0".to_vec()));
    assert_eq!(inner[1].0, 2 | NLA_F_NESTED);
    assert_eq!(attrs(&inner[1].1), vec![(1, 100u16.to_ne_bytes().to_vec())]);
    Ok(())
}

#[test]
fn test_aligned_records() -> Result<()> {
    let options = BuildOptions::new().capacity(32).padding(Padding::Align4);
    let header = NlMsgHdr::new(NlMsgType::RTM_NEWADDR, NLM_F_REQUEST, 7, 0);
    let mut msg = MessageBuilder::with_options(&Sequencer::new(), header, options)?;
    msg.append_attr_u8(1, 24)?;
    msg.append_attr_string(2, "abc")?;
    msg.append_attr_u32(3, 0)?;
    let msg = msg.finish()?;

    let mut data = msg.payload();
    let mut starts = Vec::new();
    let mut offset = NLMSG_HDRLEN;
    while !data.is_empty() {
        starts.push(offset);
        let len = nla_align(NlAttr::from_bytes(data)?.nla_len as usize);
        data = &data[len..];
        offset += len;
    }
    assert_eq!(starts, vec![16, 24, 32]);
    assert!(starts.iter().all(|s| s % 4 == 0));
    assert_eq!(msg.header().unwrap().nlmsg_len as usize, msg.len());
    assert_eq!(msg.seq(), Some(7));
    Ok(())
}

#[test]
fn test_unpadded_is_byte_exact() -> Result<()> {
    let mut msg = MessageBuilder::attributes()?;
    msg.append_attr_u8(1, 0xff)?;
    msg.append_attr_u8(2, 0xee)?;
    let msg = msg.finish()?;

    let mut expected = Vec::new();
    expected.extend_from_slice(&5u16.to_ne_bytes());
    expected.extend_from_slice(&1u16.to_ne_bytes());
    expected.push(0xff);
    expected.extend_from_slice(&5u16.to_ne_bytes());
    expected.extend_from_slice(&2u16.to_ne_bytes());
    expected.push(0xee);
    assert_eq!(msg.as_bytes(), expected.as_slice());
    Ok(())
}

#[test]
fn test_oversized_attribute_is_rejected() -> Result<()> {
    let mut msg = MessageBuilder::new(16, 0, 1, 0)?;
    let err = msg.append_attr(1, &vec![0u8; 1 << 16]).unwrap_err();
    assert!(err.is_too_large());

    // the builder is still usable and unchanged
    msg.append_attr_u8(2, 1)?;
    let msg = msg.finish()?;
    assert_eq!(attrs(msg.payload()), vec![(2, vec![1])]);
    Ok(())
}

#[test]
fn test_into_bytes_for_transport() -> Result<()> {
    let mut msg = MessageBuilder::new(16, 0, 3, 0)?;
    msg.append_bytes(&[1, 2, 3, 4])?;
    let msg = msg.finish()?;
    let expected = msg.as_bytes().to_vec();

    let bytes: bytes::Bytes = msg.into();
    assert_eq!(&bytes[..], expected.as_slice());
    Ok(())
}
